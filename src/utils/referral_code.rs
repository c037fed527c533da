use rand::Rng;

pub const REFERRAL_CODE_LEN: usize = 8;
const REFERRAL_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Draws a random code of uppercase letters and digits.
/// Uniqueness is not implied; callers check against stored codes.
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    (0..REFERRAL_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..REFERRAL_CODE_CHARSET.len());
            char::from(REFERRAL_CODE_CHARSET[idx])
        })
        .collect()
}

/// Canonical form used for lookups.
pub fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

pub fn is_well_formed(code: &str) -> bool {
    code.len() == REFERRAL_CODE_LEN
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}
