//! Ranking handler implementations

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedEditor,
    reply::Reply,
    state::AppState,
    utils::parse_position,
};

use super::request::{CreateRankingRequest, RankingQuery};

/// GET /ranking - entries in a position range, optionally filtered
pub async fn list_ranking(
    State(state): State<AppState>,
    query: Result<Query<RankingQuery>, QueryRejection>,
) -> AppResult<Reply> {
    let Query(query) = query?;

    let entries = state.ranking().get_range(&query).await?;

    Ok(Reply::ok(&entries)?)
}

/// GET /ranking/{position}
pub async fn get_ranking_by_position(
    State(state): State<AppState>,
    Path(position): Path<String>,
) -> AppResult<Reply> {
    let position = parse_position(&position).map_err(AppError::validation)?;

    let entry = state.ranking().get_by_position(position).await?;

    Ok(Reply::ok(&entry)?)
}

/// GET /ranking/id/{id}
pub async fn get_ranking_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Reply> {
    let entry = state.ranking().get_by_id(&id).await?;

    Ok(Reply::ok(&entry)?)
}

/// POST /ranking - add a contestant (editors only)
pub async fn create_ranking(
    State(state): State<AppState>,
    editor: AuthenticatedEditor,
    payload: Result<Json<CreateRankingRequest>, JsonRejection>,
) -> AppResult<Reply> {
    let Json(payload) = payload?;

    let placed = state
        .ranking()
        .insert(&payload.name, &payload.grade_and_class, payload.score)
        .await?;

    info!(editor = %editor.id, id = %placed.id, position = placed.position, "Editor added ranking entry");

    Ok(Reply::created(&placed)?)
}
