//! Ranking handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Ranking routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_ranking))
        .route(
            "/",
            post(handler::create_ranking)
                .layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
        .route("/{position}", get(handler::get_ranking_by_position))
        .route("/id/{id}", get(handler::get_ranking_by_id))
}
