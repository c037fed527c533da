use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::rewards::RewardsConfig,
    entity::{course, purchase, user},
    error::{is_unique_violation, ServiceError},
    repositories::{self, purchase::NewPurchase},
    services::ledger,
};

#[derive(Debug, Clone)]
pub struct PurchaseOutcome {
    pub purchase: purchase::Model,
    pub course: course::Model,
    pub remaining_credits: i64,
    /// Set when this purchase converted the buyer's referral and paid the referrer.
    pub referrer_rewarded: Option<Uuid>,
}

/// Buys `course_id` for `user_id`. Every check and write happens in one
/// transaction: either the debit, the purchase record and any referral
/// conversion all land, or nothing does.
pub async fn purchase_course(
    db: &DatabaseConnection,
    rewards: &RewardsConfig,
    user_id: Uuid,
    course_id: Uuid,
) -> Result<PurchaseOutcome, ServiceError> {
    let txn = db.begin().await?;

    let course = repositories::course::find_by_id(&txn, course_id)
        .await?
        .ok_or(ServiceError::CourseNotFound)?;

    if repositories::purchase::exist_by_user_and_course(&txn, user_id, course_id).await? {
        return Err(ServiceError::AlreadyPurchased);
    }

    let buyer = repositories::user::find_by_id(&txn, user_id)
        .await?
        .ok_or(ServiceError::UserNotFound)?;

    if buyer.credits < rewards.course_cost {
        return Err(ServiceError::InsufficientBalance {
            required: rewards.course_cost,
        });
    }

    // Read before any write below flips `has_purchased`.
    let is_first_purchase = !buyer.has_purchased;

    let referrer_rewarded = if is_first_purchase {
        convert_referral(&txn, rewards, &buyer).await?
    } else {
        None
    };

    if !ledger::debit_for_purchase(&txn, buyer.id, rewards.course_cost).await? {
        // A concurrent purchase spent the coins after the balance check.
        return Err(ServiceError::InsufficientBalance {
            required: rewards.course_cost,
        });
    }

    let purchase = record_purchase(
        &txn,
        NewPurchase {
            user_id: buyer.id,
            course_id: course.id,
            amount: rewards.course_cost,
            credits_earned: 0,
            is_first_purchase,
        },
    )
    .await?;

    // Read after the debit so concurrent credits to the buyer are included.
    let remaining_credits = repositories::user::find_by_id(&txn, buyer.id)
        .await?
        .ok_or(ServiceError::UserNotFound)?
        .credits;

    txn.commit().await?;

    info!(
        "User {} bought course {} (first purchase: {}, referrer rewarded: {:?})",
        buyer.id, course.id, is_first_purchase, referrer_rewarded
    );

    Ok(PurchaseOutcome {
        purchase,
        course,
        remaining_credits,
        referrer_rewarded,
    })
}

/// Inserts the purchase row. Losing the race on the (user, course) unique
/// index to a concurrent buyer reports `AlreadyPurchased`.
async fn record_purchase<C: ConnectionTrait>(
    db: &C,
    new_purchase: NewPurchase,
) -> Result<purchase::Model, ServiceError> {
    let (user_id, course_id) = (new_purchase.user_id, new_purchase.course_id);
    match repositories::purchase::save(db, new_purchase).await {
        Ok(purchase) => Ok(purchase),
        Err(e) if is_unique_violation(&e) => {
            warn!(
                "Concurrent duplicate purchase of course {} by user {}",
                course_id, user_id
            );
            Err(ServiceError::AlreadyPurchased)
        }
        Err(e) => Err(e.into()),
    }
}

/// Converts the buyer's pending referral and pays the referrer. Returns the
/// paid referrer, or `None` when there is nothing (left) to award.
async fn convert_referral(
    txn: &DatabaseTransaction,
    rewards: &RewardsConfig,
    buyer: &user::Model,
) -> Result<Option<Uuid>, ServiceError> {
    let Some(referrer_id) = buyer.referred_by else {
        return Ok(None);
    };

    let Some(referral) =
        repositories::referral::find_by_pair(txn, referrer_id, buyer.id).await?
    else {
        return Ok(None);
    };

    if referral.purchase_awarded {
        return Ok(None);
    }

    // The guarded update is the one-shot gate; only its winner pays out.
    if !repositories::referral::mark_converted(txn, referral.id, Utc::now()).await? {
        return Ok(None);
    }

    ledger::credit(txn, referrer_id, rewards.referrer_purchase_bonus).await?;
    Ok(Some(referrer_id))
}
