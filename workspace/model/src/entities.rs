//! This file serves as the root for all SeaORM entity modules.
//! Every entity carries the same audit columns (`status`, `created_at`,
//! `updated_at`, `deleted_at`) managed through [`crate::lifecycle`].

pub mod item;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::item::Entity as Item;
    pub use super::student::Entity as Student;
    pub use super::subject::Entity as Subject;
    pub use super::teacher::Entity as Teacher;
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, DbErr, EntityTrait, Set};

    use super::*;
    use crate::lifecycle::{self, Lifecycle, RecordStatus};
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_insert_stamps_audit_columns() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let teacher = teacher::ActiveModel {
            first_name: Set("Ann".to_string()),
            last_name: Set("Lee".to_string()),
            age: Set(30),
            subject: Set("Math".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        assert!(teacher.id > 0);
        assert_eq!(teacher.status, RecordStatus::Active);
        assert_eq!(teacher.created_at, teacher.updated_at);
        assert_eq!(teacher.deleted_at, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at_only() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let subject = subject::ActiveModel {
            name: Set("Mathematics".to_string()),
            code: Set("MATH101".to_string()),
            credits: Set(3),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let mut active: subject::ActiveModel = subject.clone().into();
        active.credits = Set(4);
        let updated = active.update(&db).await?;

        assert_eq!(updated.id, subject.id);
        assert_eq!(updated.credits, 4);
        assert_eq!(updated.created_at, subject.created_at);
        assert!(updated.updated_at > subject.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn test_soft_delete_hides_record_from_live_queries() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let kept = item::ActiveModel {
            name: Set("Projector".to_string()),
            description: Set(None),
            quantity: Set(2),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let removed = item::ActiveModel {
            name: Set("Chalk".to_string()),
            description: Set(Some("White, box of 12".to_string())),
            quantity: Set(40),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let mut active: item::ActiveModel = removed.clone().into();
        lifecycle::mark_deleted(&mut active);
        let deleted = active.update(&db).await?;
        assert_eq!(deleted.status, RecordStatus::Deleted);
        assert!(deleted.deleted_at.is_some());

        let live = Item::find_live().all(&db).await?;
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, kept.id);

        // Still physically present
        let all = Item::find().all(&db).await?;
        assert_eq!(all.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_user_email_is_unique() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let new_user = || user::ActiveModel {
            email: Set("ann@example.com".to_string()),
            password_hash: Set(user::hash_password("secret").expect("hash")),
            first_name: Set("Ann".to_string()),
            last_name: Set("Lee".to_string()),
            ..Default::default()
        };

        new_user().insert(&db).await?;
        let duplicate = new_user().insert(&db).await;
        assert!(duplicate.is_err());

        let students = Student::find().all(&db).await?;
        assert!(students.is_empty());
        let users = User::find().all(&db).await?;
        assert_eq!(users.len(), 1);

        Ok(())
    }
}
