use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Debug, PartialEq, Eq, Clone, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique, indexed)]
    pub email: String,
    pub name: String,
    pub password_hash: String,
    #[sea_orm(unique, indexed)]
    pub referral_code: String,
    #[sea_orm(nullable)]
    pub referred_by: Option<Uuid>,
    pub credits: i64,
    pub has_purchased: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ReferredBy",
        to = "Column::Id",
        on_delete = "SetNull"
    )]
    Referrer,
    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchase,
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchase.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
