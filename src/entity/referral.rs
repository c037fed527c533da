use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `pending` until the referred user's first purchase, then `converted` for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum ReferralStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "converted")]
    Converted,
}

#[derive(Debug, PartialEq, Eq, Clone, DeriveEntityModel)]
#[sea_orm(table_name = "referrals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub referrer_id: Uuid,
    #[sea_orm(unique, indexed)]
    pub referred_id: Uuid,
    pub status: ReferralStatus,
    pub signup_awarded: bool,
    pub purchase_awarded: bool,
    #[sea_orm(nullable)]
    pub converted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReferrerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Referrer,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReferredId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Referred,
}

impl ActiveModelBehavior for ActiveModel {}
