//! Coin balance mutations. Every change is a single conditional `UPDATE`
//! so concurrent writers never read-modify-write a stale balance.

use chrono::Utc;
use sea_orm::{sea_query::Expr, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entity::user;

/// Adds `amount` coins to a user's balance.
#[tracing::instrument(skip(db))]
pub async fn credit<C: ConnectionTrait>(db: &C, user_id: Uuid, amount: i64) -> Result<(), DbErr> {
    let result = user::Entity::update_many()
        .col_expr(user::Column::Credits, Expr::col(user::Column::Credits).add(amount))
        .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(user::Column::Id.eq(user_id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(DbErr::RecordNotUpdated);
    }
    Ok(())
}

/// Takes `amount` coins for a purchase and marks the user as a buyer.
/// Returns `false` without touching anything when the balance is short.
#[tracing::instrument(skip(db))]
pub async fn debit_for_purchase<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    amount: i64,
) -> Result<bool, DbErr> {
    let result = user::Entity::update_many()
        .col_expr(user::Column::Credits, Expr::col(user::Column::Credits).sub(amount))
        .col_expr(user::Column::HasPurchased, Expr::value(true))
        .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(user::Column::Id.eq(user_id))
        .filter(user::Column::Credits.gte(amount))
        .exec(db)
        .await?;
    Ok(result.rows_affected == 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{repositories, test_support};

    #[tokio::test]
    async fn credit_adds_to_the_balance() {
        let db = test_support::memory_db().await;
        let user = test_support::insert_user(&db, "ada@example.com", 2).await;

        credit(&db, user.id, 8).await.unwrap();
        credit(&db, user.id, 4).await.unwrap();

        let stored = repositories::user::find_by_id(&db, user.id).await.unwrap().unwrap();
        assert_eq!(stored.credits, 14);
    }

    #[tokio::test]
    async fn credit_to_a_missing_user_fails() {
        let db = test_support::memory_db().await;
        let err = credit(&db, Uuid::new_v4(), 8).await.unwrap_err();
        assert!(matches!(err, DbErr::RecordNotUpdated));
    }

    #[tokio::test]
    async fn debit_refuses_to_overdraw() {
        let db = test_support::memory_db().await;
        let user = test_support::insert_user(&db, "ada@example.com", 9).await;

        assert!(!debit_for_purchase(&db, user.id, 10).await.unwrap());

        let stored = repositories::user::find_by_id(&db, user.id).await.unwrap().unwrap();
        assert_eq!(stored.credits, 9);
        assert!(!stored.has_purchased);
    }

    #[tokio::test]
    async fn debit_takes_coins_and_marks_buyer() {
        let db = test_support::memory_db().await;
        let user = test_support::insert_user(&db, "ada@example.com", 10).await;

        assert!(debit_for_purchase(&db, user.id, 10).await.unwrap());

        let stored = repositories::user::find_by_id(&db, user.id).await.unwrap().unwrap();
        assert_eq!(stored.credits, 0);
        assert!(stored.has_purchased);
    }
}
