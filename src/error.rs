use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// A single request field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Error taxonomy of the user domain. The service layer propagates these
/// without changing their kind; translation to HTTP happens once, in
/// [`IntoResponse`].
#[derive(Debug, Error)]
pub enum AppError {
    /// One or more request fields are structurally invalid.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// The requested row does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Store connectivity or constraint failure, wrapped with the
    /// operation that hit it.
    #[error("database error while {op}")]
    Persistence {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// Credential transform failure. Fatal for the request, not the process.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl AppError {
    pub fn persistence(op: &'static str, source: sqlx::Error) -> Self {
        Self::Persistence { op, source }
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound(format!("user {id}"))
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldError>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, body) = match self {
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    status: "Invalid request.",
                    fields: Some(fields),
                },
            ),
            AppError::NotFound(what) => {
                warn!(%what, "resource not found");
                (
                    StatusCode::NOT_FOUND,
                    ErrorBody {
                        status: "Resource not found.",
                        fields: None,
                    },
                )
            }
            // Raw store/hash error text stays in the logs, never in the body.
            AppError::Persistence { op, source } => {
                error!(error = %source, op, "persistence failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        status: "Something went wrong. Try again later",
                        fields: None,
                    },
                )
            }
            AppError::Hashing(cause) => {
                error!(error = %cause, "hashing failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        status: "Something went wrong. Try again later",
                        fields: None,
                    },
                )
            }
        };

        (code, Json(body)).into_response()
    }
}
