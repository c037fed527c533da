use crate::entity::referral::{self, ReferralStatus};
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

/// Records a referral whose signup bonus has been paid.
#[tracing::instrument(skip_all)]
pub async fn save_signup_awarded<C: ConnectionTrait>(
    db: &C,
    referrer_id: Uuid,
    referred_id: Uuid,
) -> Result<referral::Model, DbErr> {
    referral::ActiveModel {
        id: Set(Uuid::new_v4()),
        referrer_id: Set(referrer_id),
        referred_id: Set(referred_id),
        status: Set(ReferralStatus::Pending),
        signup_awarded: Set(true),
        purchase_awarded: Set(false),
        converted_at: Set(None),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_pair<C: ConnectionTrait>(
    db: &C,
    referrer_id: Uuid,
    referred_id: Uuid,
) -> Result<Option<referral::Model>, DbErr> {
    referral::Entity::find()
        .filter(referral::Column::ReferrerId.eq(referrer_id))
        .filter(referral::Column::ReferredId.eq(referred_id))
        .one(db)
        .await
}

/// Flips a pending referral to converted. The update only matches while
/// `purchase_awarded` is still false, so exactly one caller ever sees `true`.
#[tracing::instrument(skip_all)]
pub async fn mark_converted<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    at: DateTime<Utc>,
) -> Result<bool, DbErr> {
    let result = referral::Entity::update_many()
        .col_expr(referral::Column::Status, Expr::value(ReferralStatus::Converted.to_value()))
        .col_expr(referral::Column::PurchaseAwarded, Expr::value(true))
        .col_expr(referral::Column::ConvertedAt, Expr::value(Some(at)))
        .filter(referral::Column::Id.eq(id))
        .filter(referral::Column::Status.eq(ReferralStatus::Pending.to_value()))
        .filter(referral::Column::PurchaseAwarded.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected == 1)
}

/// All referrals made by `referrer_id`, newest first.
#[tracing::instrument(skip_all)]
pub async fn find_by_referrer<C: ConnectionTrait>(
    db: &C,
    referrer_id: Uuid,
) -> Result<Vec<referral::Model>, DbErr> {
    referral::Entity::find()
        .filter(referral::Column::ReferrerId.eq(referrer_id))
        .order_by_desc(referral::Column::CreatedAt)
        .all(db)
        .await
}
