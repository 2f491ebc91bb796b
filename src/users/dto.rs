use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo::User;

/// Request body for creating a user. Missing fields decode as empty so
/// validation can report them instead of a decode rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for updating a user. `None` means "leave unchanged";
/// a present empty string is a validation failure, not a no-op.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

/// Public view of a user returned to clients. No credential field exists
/// here at all.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_defaults_missing_fields_to_empty() {
        let request: CreateUserRequest =
            serde_json::from_str(r#"{"email": "john@example.com"}"#).unwrap();
        assert_eq!(request.email, "john@example.com");
        assert_eq!(request.first_name, "");
        assert_eq!(request.password, "");
    }

    #[test]
    fn update_request_distinguishes_absent_from_empty() {
        let absent: UpdateUserRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(absent.first_name.is_none());

        let empty: UpdateUserRequest = serde_json::from_str(r#"{"first_name": ""}"#).unwrap();
        assert_eq!(empty.first_name.as_deref(), Some(""));
    }

    #[test]
    fn response_carries_no_credential() {
        let user = User {
            id: 7,
            email: "jane@example.com".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(json.contains("jane@example.com"));
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2id"));
    }
}
