use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::ConnectionTrait;
use tracing::warn;
use uuid::Uuid;

use crate::{
    config::ServiceConfig,
    entity::referral::ReferralStatus,
    error::ServiceError,
    repositories,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ReferredUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub status: ReferralStatus,
    pub has_purchased: bool,
    pub joined_at: DateTime<Utc>,
    pub converted_at: Option<DateTime<Utc>>,
    pub coins_earned_from_purchase: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub referral_code: String,
    pub referral_link: String,
    pub total_referred: usize,
    pub converted_users: usize,
    pub total_credits_earned: i64,
    pub referred_users: Vec<ReferredUser>,
}

/// Read-only view of everyone `user_id` has referred.
pub async fn dashboard<C: ConnectionTrait>(
    db: &C,
    config: &ServiceConfig,
    user_id: Uuid,
) -> Result<Dashboard, ServiceError> {
    let owner = repositories::user::find_by_id(db, user_id)
        .await?
        .ok_or(ServiceError::UserNotFound)?;

    let referrals = repositories::referral::find_by_referrer(db, owner.id).await?;
    let referred: HashMap<Uuid, _> =
        repositories::user::find_by_ids(db, referrals.iter().map(|r| r.referred_id).collect())
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

    let referred_users: Vec<ReferredUser> = referrals
        .iter()
        .map(|referral| {
            let friend = referred.get(&referral.referred_id);
            if friend.is_none() {
                warn!(
                    "Referral {} points at missing user {}",
                    referral.id, referral.referred_id
                );
            }
            let converted = referral.status == ReferralStatus::Converted;
            ReferredUser {
                id: referral.referred_id,
                name: friend.map(|f| f.name.clone()).unwrap_or_default(),
                email: friend.map(|f| f.email.clone()).unwrap_or_default(),
                status: referral.status,
                has_purchased: friend.is_some_and(|f| f.has_purchased),
                joined_at: referral.created_at,
                converted_at: referral.converted_at,
                coins_earned_from_purchase: if converted {
                    config.rewards.referrer_purchase_bonus
                } else {
                    0
                },
            }
        })
        .collect();

    Ok(Dashboard {
        referral_link: config.app.referral_link(&owner.referral_code),
        referral_code: owner.referral_code,
        total_referred: referrals.len(),
        converted_users: referrals
            .iter()
            .filter(|r| r.status == ReferralStatus::Converted)
            .count(),
        total_credits_earned: owner.credits,
        referred_users,
    })
}
