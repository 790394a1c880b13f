use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use once_cell::sync::Lazy;
use sea_orm::entity::prelude::*;

use crate::lifecycle::{self, Lifecycle, RecordStatus};

/// An account that can log in to the administration frontend.
/// Looked up by `email`; `id` is the surrogate key.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    /// The hashed password of the user. (argon2, PHC string format)
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub status: RecordStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Model {
    /// Uses argon2 to verify the stored hash against the provided password.
    pub fn verify_password(&self, password: &str) -> bool {
        let hash = match PasswordHash::new(&self.password_hash) {
            Ok(hash) => hash,
            Err(err) => {
                tracing::error!("failed to parse password hash for user {}: {}", self.id, err);
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok()
    }
}

/// Generates a new salted password hash using argon2.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Hash of a password nobody has, checked when no user matches a login.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("no user has this password").ok());

/// Run a full argon2 verification for a login with no matching user, so an
/// unknown email takes as long to reject as a wrong password. Always fails.
pub fn verify_password_without_user(password: &str) -> bool {
    let Some(hash) = DUMMY_HASH.as_deref().and_then(|h| PasswordHash::new(h).ok()) else {
        tracing::error!("dummy password hash unavailable");
        return false;
    };
    let _ = Argon2::default().verify_password(password.as_bytes(), &hash);
    false
}

impl Lifecycle for Entity {
    fn id_column() -> Column {
        Column::Id
    }

    fn status_column() -> Column {
        Column::Status
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }

    fn updated_at_column() -> Column {
        Column::UpdatedAt
    }

    fn deleted_at_column() -> Column {
        Column::DeletedAt
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        lifecycle::stamp(&mut self, insert);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user_with_hash(password_hash: String) -> Model {
        let now = Utc::now();
        Model {
            id: 1,
            email: "ann@example.com".to_string(),
            password_hash,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            status: RecordStatus::Active,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("hunter2").unwrap();
        let second = hash_password("hunter2").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_password() {
        let user = user_with_hash(hash_password("hunter2").unwrap());
        assert!(user.verify_password("hunter2"));
        assert!(!user.verify_password("hunter3"));
        assert!(!user.verify_password(""));
    }

    #[test]
    fn test_verify_password_without_user_always_fails() {
        let hash = DUMMY_HASH.as_deref().expect("dummy hash is generated");
        assert!(PasswordHash::new(hash).is_ok());
        assert!(!verify_password_without_user("no user has this password"));
        assert!(!verify_password_without_user(""));
    }

    #[test]
    fn test_verify_password_with_corrupt_hash() {
        let user = user_with_hash("not-a-phc-string".to_string());
        assert!(!user.verify_password("not-a-phc-string"));
    }
}
