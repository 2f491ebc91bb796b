use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;

use super::dto::{CreateUserRequest, UpdateUserRequest};
use super::repo::User;
use super::service::UserService;
use crate::error::AppError;

/// Explicitly constructed per-test in-memory [`UserService`]. Honors the
/// repository contracts (ascending-id listing, not-found on repeat delete)
/// but skips validation and hashing, which belong to the production
/// service and have their own tests.
pub(crate) struct InMemoryUsers {
    rows: Mutex<BTreeMap<i64, User>>,
}

impl InMemoryUsers {
    pub(crate) fn seeded<'a>(emails: impl IntoIterator<Item = &'a str>) -> Arc<Self> {
        let rows = emails
            .into_iter()
            .enumerate()
            .map(|(i, email)| {
                let id = i as i64 + 1;
                (
                    id,
                    User {
                        id,
                        email: email.to_string(),
                        first_name: "John".into(),
                        last_name: "Doe".into(),
                        password_hash: "$argon2id$v=19$seeded".into(),
                        created_at: OffsetDateTime::UNIX_EPOCH,
                        updated_at: OffsetDateTime::UNIX_EPOCH,
                    },
                )
            })
            .collect();

        Arc::new(Self {
            rows: Mutex::new(rows),
        })
    }
}

#[async_trait]
impl UserService for InMemoryUsers {
    async fn create(&self, input: CreateUserRequest) -> Result<User, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.keys().next_back().copied().unwrap_or(0) + 1;
        let user = User {
            id,
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            password_hash: input.password,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        rows.insert(id, user.clone());
        Ok(user)
    }

    async fn get(&self, id: i64) -> Result<User, AppError> {
        self.rows
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::user_not_found(id))
    }

    async fn get_by_email(&self, email: &str) -> Result<User, AppError> {
        self.rows
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("user {email}")))
    }

    async fn query(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn update(&self, id: i64, input: UpdateUserRequest) -> Result<User, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows.get_mut(&id).ok_or_else(|| AppError::user_not_found(id))?;

        if let Some(first_name) = input.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            user.last_name = last_name;
        }
        if let Some(password) = input.password {
            user.password_hash = password;
        }
        user.updated_at = OffsetDateTime::now_utc();

        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<User, AppError> {
        self.rows
            .lock()
            .unwrap()
            .remove(&id)
            .ok_or_else(|| AppError::user_not_found(id))
    }
}
