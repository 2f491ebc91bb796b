use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::instrument;

use super::context::PathUser;
use super::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::error::AppError;
use crate::pagination::{Page, PageParams};
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<UserResponse>>, AppError> {
    let total_count = state.users.count().await?;
    let users = state.users.query(params.offset(), params.limit()).await?;
    let items = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(Page::new(params, total_count, items)))
}

#[instrument(skip(state, input))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state.users.create(input).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(user))]
pub async fn get_user(Extension(PathUser(user)): Extension<PathUser>) -> Json<UserResponse> {
    Json(user.into())
}

#[instrument(skip(state, user, input))]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(PathUser(user)): Extension<PathUser>,
    Json(input): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.users.update(user.id, input).await?;
    Ok(Json(user.into()))
}

/// Responds with the snapshot of the row as it was before deletion.
#[instrument(skip(state, user))]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(PathUser(user)): Extension<PathUser>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.users.delete(user.id).await?;
    Ok(Json(user.into()))
}
