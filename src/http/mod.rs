//! Axum HTTP server: the public JSON API.
//!
//! ## URL layout
//!
//! ```text
//! GET  /                           liveness message
//! GET  /regions
//! GET  /tournaments/{region}       ?year=<int>
//! GET  /games/{tournament}         tournament may contain '/'
//! GET  /game-details               ?game_id=<id>
//! GET  /team-logo/{team_name}
//! ```
//!
//! `serve()` drives the axum event loop; the [`CancellationToken`] is wired
//! to axum's graceful shutdown.

mod api;

use axum::{Router, http::HeaderValue, routing::get};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::source::DataSource;

// ── Shared request state ──────────────────────────────────────────────────────

/// Router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone: the data source is reference-counted internally.
#[derive(Clone)]
pub struct AppState {
    pub source: DataSource,
}

impl AppState {
    pub fn new(source: DataSource) -> Self {
        Self { source }
    }
}

// ── Server loop ───────────────────────────────────────────────────────────────

/// Bind `config.bind` and serve until `shutdown` is cancelled.
pub async fn serve(config: &ServerConfig, source: DataSource, shutdown: CancellationToken) -> Result<(), AppError> {
    let router = build_router(AppState::new(source), &config.cors_origins);

    let listener = TcpListener::bind(&config.bind)
        .await
        .map_err(|e| AppError::Server(format!("bind failed on {}: {e}", config.bind)))?;

    let local_addr = listener
        .local_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| config.bind.clone());
    info!(bind = %local_addr, "http server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(format!("axum server error: {e}")))?;

    info!("http server shut down");
    Ok(())
}

// ── Router ────────────────────────────────────────────────────────────────────

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/",                       get(api::root))
        .route("/regions",                get(api::regions))
        .route("/tournaments/{region}",   get(api::tournaments))
        .route("/games/{*tournament}",    get(api::games))
        .route("/game-details",           get(api::game_details))
        .route("/team-logo/{team_name}",  get(api::team_logo))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentialed CORS for a fixed origin list. Methods and headers mirror the
/// preflight request, since wildcards are not allowed with credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
