use crate::{entity::user, utils::referral_code};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use uuid::Uuid;

pub struct NewUser<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub referral_code: &'a str,
    pub referred_by: Option<Uuid>,
    pub credits: i64,
}

#[tracing::instrument(skip_all)]
pub async fn save<C: ConnectionTrait>(db: &C, new_user: NewUser<'_>) -> Result<user::Model, DbErr> {
    let now = Utc::now();
    user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(new_user.email.to_string()),
        name: Set(new_user.name.to_string()),
        password_hash: Set(new_user.password_hash.to_string()),
        referral_code: Set(new_user.referral_code.to_string()),
        referred_by: Set(new_user.referred_by),
        credits: Set(new_user.credits),
        has_purchased: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find_by_id(id).one(db).await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
}

/// Looks a user up by referral code. The code is matched case-insensitively.
#[tracing::instrument(skip_all)]
pub async fn find_by_referral_code<C: ConnectionTrait>(
    db: &C,
    code: &str,
) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find()
        .filter(user::Column::ReferralCode.eq(referral_code::normalize(code)))
        .one(db)
        .await
}

#[tracing::instrument(skip_all)]
pub async fn exist_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<bool, DbErr> {
    Ok(user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .count(db)
        .await?
        > 0)
}

#[tracing::instrument(skip_all)]
pub async fn exist_by_referral_code<C: ConnectionTrait>(db: &C, code: &str) -> Result<bool, DbErr> {
    Ok(user::Entity::find()
        .filter(user::Column::ReferralCode.eq(code))
        .count(db)
        .await?
        > 0)
}

#[tracing::instrument(skip_all)]
pub async fn find_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: Vec<Uuid>,
) -> Result<Vec<user::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    user::Entity::find()
        .filter(user::Column::Id.is_in(ids))
        .all(db)
        .await
}
