/// Coin amounts of the referral program. These are fixed; clients and
/// stored records depend on the exact values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardsConfig {
    /// Balance every account starts with.
    pub initial_grant: i64,
    /// Paid to the referrer when a referred friend signs up.
    pub referrer_signup_bonus: i64,
    /// Paid to the new user on top of the initial grant when signing up with a valid code.
    pub friend_signup_bonus: i64,
    /// Paid to the referrer once, on the referred friend's first purchase.
    pub referrer_purchase_bonus: i64,
    /// Flat cost of any course. The listed course price is display-only.
    pub course_cost: i64,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            initial_grant: 2,
            referrer_signup_bonus: 8,
            friend_signup_bonus: 4,
            referrer_purchase_bonus: 10,
            course_cost: 10,
        }
    }
}
