use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum CourseLevel {
    #[sea_orm(string_value = "Beginner")]
    Beginner,
    #[sea_orm(string_value = "Intermediate")]
    Intermediate,
    #[sea_orm(string_value = "Advanced")]
    Advanced,
}

#[derive(Debug, PartialEq, Clone, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub instructor: String,
    /// Listed price, shown to users only. Purchases always cost the flat course cost.
    pub price: f64,
    pub duration: String,
    pub level: CourseLevel,
    pub thumbnail: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchase,
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchase.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
