use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};

use super::dto::{CreateUserRequest, UpdateUserRequest};
use super::password::hash_password;
use super::repo::{NewUser, User};
use super::validate;
use crate::error::AppError;

/// Operations the handler and middleware layers expect from the user
/// domain. Production uses [`PgUserService`]; tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn create(&self, input: CreateUserRequest) -> Result<User, AppError>;
    async fn get(&self, id: i64) -> Result<User, AppError>;
    async fn get_by_email(&self, email: &str) -> Result<User, AppError>;
    async fn query(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    async fn update(&self, id: i64, input: UpdateUserRequest) -> Result<User, AppError>;
    async fn delete(&self, id: i64) -> Result<User, AppError>;
}

/// Postgres-backed user service. Reads go straight through the pool;
/// multi-step writes open their own transaction.
pub struct PgUserService {
    db: PgPool,
}

impl PgUserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Emails are normalized the same way before every read and write, keeping
/// lookups consistent with the store's uniqueness constraint.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl UserService for PgUserService {
    async fn create(&self, mut input: CreateUserRequest) -> Result<User, AppError> {
        input.email = normalize_email(&input.email);
        validate::create(&input)?;

        let password_hash = hash_password(&input.password)?;

        // The insert runs in its own unit of work so nothing between the
        // hash and the commit can leave a partial row behind.
        let mut tx = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::persistence("begin insert user", e))?;

        let new = NewUser {
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            password_hash,
        };

        let user = match User::insert(&mut *tx, &new).await {
            Ok(user) => user,
            Err(err) => {
                if let Err(e) = tx.rollback().await {
                    error!(error = %e, "rollback after failed user insert");
                }
                return Err(err);
            }
        };

        tx.commit()
            .await
            .map_err(|e| AppError::persistence("commit insert user", e))?;

        info!(user_id = user.id, email = %user.email, "user created");
        Ok(user)
    }

    async fn get(&self, id: i64) -> Result<User, AppError> {
        User::find_by_id(&self.db, id).await
    }

    async fn get_by_email(&self, email: &str) -> Result<User, AppError> {
        User::find_by_email(&self.db, &normalize_email(email)).await
    }

    async fn query(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
        User::list(&self.db, offset, limit).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        User::count(&self.db).await
    }

    async fn update(&self, id: i64, input: UpdateUserRequest) -> Result<User, AppError> {
        validate::update(&input)?;

        let mut user = self.get(id).await?;

        if let Some(first_name) = input.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            user.last_name = last_name;
        }
        // Validation already rejected a present-but-empty password.
        if let Some(password) = input.password {
            user.password_hash = hash_password(&password)?;
        }

        let user = User::update(&self.db, &user).await?;
        info!(user_id = user.id, "user updated");
        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<User, AppError> {
        let user = self.get(id).await?;
        User::delete(&self.db, id).await?;
        info!(user_id = user.id, email = %user.email, "user deleted");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  John@Example.COM "), "john@example.com");
        assert_eq!(normalize_email("jane@example.com"), "jane@example.com");
    }
}
