//! Axum handlers for the public routes.
//!
//! Every handler makes exactly one data-source call and wraps the result in
//! a small JSON object. Any source failure becomes a 500 whose `detail`
//! carries the error text.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, error};

use crate::source::SourceError;

use super::AppState;

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    /// Any data-source failure. Always a 500.
    #[error("Failed to fetch {what}: {source}")]
    Fetch {
        what: &'static str,
        source: SourceError,
    },
    /// Query string could not be coerced into the handler's parameters.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    fn fetch(what: &'static str, source: SourceError) -> Self {
        Self::Fetch { what, source }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Fetch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

// ── Request types ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(super) struct TournamentsQuery {
    year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GameDetailsQuery {
    game_id: String,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// GET /
pub(super) async fn root() -> Json<Value> {
    Json(json!({ "message": "League Custom Tracker API is running" }))
}

/// GET /regions
pub(super) async fn regions(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let regions = state.source.regions().await.map_err(|e| {
        error!(error = %e, "error fetching regions");
        ApiError::fetch("regions", e)
    })?;
    debug!(count = regions.len(), "regions fetched");
    Ok(Json(json!({ "regions": regions })))
}

/// GET /tournaments/{region}?year=
pub(super) async fn tournaments(
    State(state): State<AppState>,
    Path(region): Path<String>,
    query: Result<Query<TournamentsQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query?;
    let tournaments = state.source.tournaments(&region, params.year).await.map_err(|e| {
        error!(%region, year = ?params.year, error = %e, "error fetching tournaments");
        ApiError::fetch("tournaments", e)
    })?;
    debug!(%region, count = tournaments.len(), "tournaments fetched");
    Ok(Json(json!({
        "region": region,
        "year": params.year,
        "tournaments": tournaments,
    })))
}

/// GET /games/{tournament}
///
/// Overview pages contain `/`, so the route captures the rest of the path.
pub(super) async fn games(
    State(state): State<AppState>,
    Path(tournament): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let games = state.source.games(&tournament).await.map_err(|e| {
        error!(%tournament, error = %e, "error fetching games");
        ApiError::fetch("games", e)
    })?;
    debug!(%tournament, count = games.len(), "games fetched");
    Ok(Json(json!({ "tournament": tournament, "games": games })))
}

/// GET /game-details?game_id=
pub(super) async fn game_details(
    State(state): State<AppState>,
    query: Result<Query<GameDetailsQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(GameDetailsQuery { game_id }) = query?;
    let details = state.source.game_details(&game_id).await.map_err(|e| {
        error!(%game_id, error = %e, "error fetching game details");
        ApiError::fetch("game details", e)
    })?;
    Ok(Json(json!({ "game_id": game_id, "details": details })))
}

/// GET /team-logo/{team_name}
pub(super) async fn team_logo(
    State(state): State<AppState>,
    Path(team_name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let logo_url = state.source.team_logo(&team_name).await.map_err(|e| {
        error!(%team_name, error = %e, "error fetching team logo");
        ApiError::fetch("team logo", e)
    })?;
    Ok(Json(json!({ "team_name": team_name, "logo_url": logo_url })))
}
