use crate::entity::{course, purchase};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

pub struct NewPurchase {
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub amount: i64,
    pub credits_earned: i64,
    pub is_first_purchase: bool,
}

#[tracing::instrument(skip_all)]
pub async fn save<C: ConnectionTrait>(
    db: &C,
    new_purchase: NewPurchase,
) -> Result<purchase::Model, DbErr> {
    purchase::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(new_purchase.user_id),
        course_id: Set(new_purchase.course_id),
        amount: Set(new_purchase.amount),
        credits_earned: Set(new_purchase.credits_earned),
        is_first_purchase: Set(new_purchase.is_first_purchase),
        purchase_date: Set(Utc::now()),
    }
    .insert(db)
    .await
}

#[tracing::instrument(skip_all)]
pub async fn exist_by_user_and_course<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    course_id: Uuid,
) -> Result<bool, DbErr> {
    Ok(purchase::Entity::find()
        .filter(purchase::Column::UserId.eq(user_id))
        .filter(purchase::Column::CourseId.eq(course_id))
        .count(db)
        .await?
        > 0)
}

/// Purchase history of a user with the bought course attached, newest first.
#[tracing::instrument(skip_all)]
pub async fn find_by_user_with_course<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<(purchase::Model, Option<course::Model>)>, DbErr> {
    purchase::Entity::find()
        .filter(purchase::Column::UserId.eq(user_id))
        .order_by_desc(purchase::Column::PurchaseDate)
        .find_also_related(course::Entity)
        .all(db)
        .await
}
