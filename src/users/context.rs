use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::repo::User;
use crate::error::{AppError, FieldError};
use crate::state::AppState;

/// Request-scoped handle to the user resolved from the `:id` path segment.
/// Only handlers below [`user_context`] in the same request's chain may
/// read it.
#[derive(Debug, Clone)]
pub struct PathUser(pub User);

/// Resolves `:id` into a loaded [`User`] before the handler runs. A
/// malformed id rejects with 400 and an absent (or otherwise unloadable)
/// user rejects with 404; the inner handler is never invoked in either
/// case.
pub async fn user_context(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    mut req: Request,
    next: Next,
) -> Response {
    let id: i64 = match raw_id.parse() {
        Ok(id) => id,
        Err(_) => {
            warn!(raw_id = %raw_id, "malformed user id in path");
            return AppError::Validation(vec![FieldError::new("id", "must be an integer")])
                .into_response();
        }
    };

    let user = match state.users.get(id).await {
        Ok(user) => user,
        Err(err) => {
            warn!(user_id = id, error = %err, "user lookup failed");
            return AppError::user_not_found(id).into_response();
        }
    };

    req.extensions_mut().insert(PathUser(user));
    next.run(req).await
}
