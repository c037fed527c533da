use crate::entity::course::{self, CourseLevel};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub price: f64,
    pub duration: String,
    pub level: CourseLevel,
    pub thumbnail: String,
    pub category: String,
}

#[tracing::instrument(skip_all)]
pub async fn save<C: ConnectionTrait>(db: &C, new_course: NewCourse) -> Result<course::Model, DbErr> {
    course::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(new_course.title),
        description: Set(new_course.description),
        instructor: Set(new_course.instructor),
        price: Set(new_course.price),
        duration: Set(new_course.duration),
        level: Set(new_course.level),
        thumbnail: Set(new_course.thumbnail),
        category: Set(new_course.category),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await
}

#[tracing::instrument(skip_all)]
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<course::Model>, DbErr> {
    course::Entity::find_by_id(id).one(db).await
}

#[tracing::instrument(skip_all)]
pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<course::Model>, DbErr> {
    course::Entity::find()
        .order_by_desc(course::Column::CreatedAt)
        .all(db)
        .await
}
