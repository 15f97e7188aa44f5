//! Public configuration types.
//!
//! These are the resolved, ready-to-use structs the server and data sources
//! consume. Raw TOML deserialization types live in `raw.rs`.

use std::path::PathBuf;

// ── Server ───────────────────────────────────────────────────────────────────

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the axum listener binds to.
    pub bind: String,
    /// Origins allowed by the CORS layer. Credentials are allowed for these.
    pub cors_origins: Vec<String>,
}

// ── Data source ──────────────────────────────────────────────────────────────

/// Leaguepedia wiki client configuration (`[source.leaguepedia]`).
#[derive(Debug, Clone)]
pub struct LeaguepediaConfig {
    /// MediaWiki `api.php` endpoint.
    pub api_url: String,
    /// Sent as `User-Agent`; Fandom rejects anonymous clients.
    pub user_agent: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Rows requested per `cargoquery` page (the wiki caps this at 500).
    pub page_size: u32,
}

/// Fixture source configuration (`[source.fixture]`).
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    /// JSON file with canned responses (already expanded, no `~`).
    pub path: Option<PathBuf>,
}

/// Data source selection.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Which source is active (`"leaguepedia"` or `"fixture"`).
    /// Maps to `default` in `[source]`.
    pub provider: String,
    pub leaguepedia: LeaguepediaConfig,
    pub fixture: FixtureConfig,
}

// ── Top-level ────────────────────────────────────────────────────────────────

/// Fully-resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub service_name: String,
    pub log_level: String,
    pub server: ServerConfig,
    pub source: SourceConfig,
}
