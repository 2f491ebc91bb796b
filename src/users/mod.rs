use axum::{middleware::from_fn_with_state, routing::get, Router};

use crate::state::AppState;

pub mod context;
pub mod dto;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod service;
pub(crate) mod validate;

#[cfg(test)]
pub(crate) mod testing;

/// Routes owned by the user domain. Everything addressed to a specific id
/// runs through the resource-context middleware first.
pub fn router(state: AppState) -> Router<AppState> {
    let scoped = Router::new()
        .route(
            "/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route_layer(from_fn_with_state(state, context::user_context));

    Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .merge(scoped)
}
