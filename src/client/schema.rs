use chrono::Utc;
use sea_orm::{
    sea_query::Index, ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    Schema, Set,
};
use tracing::info;
use uuid::Uuid;

use crate::entity::{
    course::{self, CourseLevel},
    purchase, referral, user,
};

pub const PURCHASE_USER_COURSE_INDEX: &str = "idx_purchases_user_course";

/// Creates every table and index the service needs if they are missing.
/// Tables are created parents first so foreign keys resolve.
pub async fn bootstrap<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut tables = vec![
        schema.create_table_from_entity(user::Entity),
        schema.create_table_from_entity(course::Entity),
        schema.create_table_from_entity(referral::Entity),
        schema.create_table_from_entity(purchase::Entity),
    ];
    for table in tables.iter_mut() {
        table.if_not_exists();
        db.execute(backend.build(&*table)).await?;
    }

    let mut indexes = Vec::new();
    indexes.extend(schema.create_index_from_entity(user::Entity));
    indexes.extend(schema.create_index_from_entity(referral::Entity));
    indexes.extend(schema.create_index_from_entity(purchase::Entity));
    for index in indexes.iter_mut() {
        index.if_not_exists();
        db.execute(backend.build(&*index)).await?;
    }

    // One purchase per (user, course); the loser of a concurrent double buy trips this.
    let mut unique_purchase = Index::create();
    unique_purchase
        .name(PURCHASE_USER_COURSE_INDEX)
        .table(purchase::Entity)
        .col(purchase::Column::UserId)
        .col(purchase::Column::CourseId)
        .unique()
        .if_not_exists();
    db.execute(backend.build(&unique_purchase)).await?;

    info!("database schema is ready");
    Ok(())
}

struct SeedCourse {
    title: &'static str,
    description: &'static str,
    instructor: &'static str,
    price: f64,
    duration: &'static str,
    level: CourseLevel,
    thumbnail: &'static str,
    category: &'static str,
}

const SEED_COURSES: [SeedCourse; 6] = [
    SeedCourse {
        title: "Complete Web Development Bootcamp",
        description: "Learn HTML, CSS, JavaScript, Node.js, React, and MongoDB from scratch. Build real-world projects and become a full-stack developer.",
        instructor: "Dr. Angela Yu",
        price: 99.99,
        duration: "65 hours",
        level: CourseLevel::Beginner,
        thumbnail: "https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=800",
        category: "Web Development",
    },
    SeedCourse {
        title: "Advanced TypeScript Programming",
        description: "Master TypeScript with advanced patterns, generics, decorators, and build enterprise-level applications.",
        instructor: "Maximilian Schwarzmüller",
        price: 79.99,
        duration: "28 hours",
        level: CourseLevel::Advanced,
        thumbnail: "https://images.unsplash.com/photo-1516116216624-53e697fedbea?w=800",
        category: "Programming",
    },
    SeedCourse {
        title: "React + Next.js Complete Guide",
        description: "Build modern, scalable web applications with React 18, Next.js 14, and server components.",
        instructor: "Maximilian Schwarzmüller",
        price: 89.99,
        duration: "42 hours",
        level: CourseLevel::Intermediate,
        thumbnail: "https://images.unsplash.com/photo-1633356122544-f134324a6cee?w=800",
        category: "Frontend Development",
    },
    SeedCourse {
        title: "MongoDB & Database Design Masterclass",
        description: "Learn MongoDB from basics to advanced, including aggregation, indexing, and performance optimization.",
        instructor: "Stephen Grider",
        price: 69.99,
        duration: "22 hours",
        level: CourseLevel::Intermediate,
        thumbnail: "https://images.unsplash.com/photo-1544383835-bda2bc66a55d?w=800",
        category: "Database",
    },
    SeedCourse {
        title: "Machine Learning with Python",
        description: "Learn machine learning algorithms, data science, and AI with hands-on Python projects.",
        instructor: "Andrew Ng",
        price: 119.99,
        duration: "55 hours",
        level: CourseLevel::Intermediate,
        thumbnail: "https://images.unsplash.com/photo-1555949963-aa79dcee981c?w=800",
        category: "Data Science",
    },
    SeedCourse {
        title: "UI/UX Design Fundamentals",
        description: "Master user interface and user experience design principles. Learn Figma, prototyping, and design thinking.",
        instructor: "Daniel Schifano",
        price: 59.99,
        duration: "18 hours",
        level: CourseLevel::Beginner,
        thumbnail: "https://images.unsplash.com/photo-1561070791-2526d30994b5?w=800",
        category: "Design",
    },
];

/// Fills an empty catalogue with the starter courses. Returns how many were inserted.
pub async fn seed_courses<C: ConnectionTrait>(db: &C) -> Result<usize, DbErr> {
    if course::Entity::find().count(db).await? > 0 {
        info!("course catalogue already populated, skipping seed");
        return Ok(0);
    }

    for seed in SEED_COURSES.iter() {
        course::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(seed.title.to_string()),
            description: Set(seed.description.to_string()),
            instructor: Set(seed.instructor.to_string()),
            price: Set(seed.price),
            duration: Set(seed.duration.to_string()),
            level: Set(seed.level),
            thumbnail: Set(seed.thumbnail.to_string()),
            category: Set(seed.category.to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(db)
        .await?;
    }

    info!("seeded {} courses", SEED_COURSES.len());
    Ok(SEED_COURSES.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_db;

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let db = memory_db().await;
        bootstrap(&db).await.unwrap();
    }

    #[tokio::test]
    async fn seeding_only_fills_an_empty_catalogue() {
        let db = memory_db().await;
        assert_eq!(seed_courses(&db).await.unwrap(), 6);
        assert_eq!(seed_courses(&db).await.unwrap(), 0);
        assert_eq!(course::Entity::find().count(&db).await.unwrap(), 6);
    }
}
