//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults.
//! The `load` module converts them into the public `types` structs.

use serde::Deserialize;

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw TOML shape, the serde target before resolution.
#[derive(Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub service: RawService,
    #[serde(default)]
    pub server: RawServer,
    #[serde(default)]
    pub source: RawSource,
}

#[derive(Deserialize)]
pub(super) struct RawService {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for RawService {
    fn default() -> Self {
        Self { name: default_service_name(), log_level: default_log_level() }
    }
}

// ── Server ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawServer {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for RawServer {
    fn default() -> Self {
        Self { bind: default_bind(), cors_origins: default_cors_origins() }
    }
}

// ── Source ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawSource {
    /// Maps to `default = "..."` in `[source]`.
    #[serde(rename = "default", default = "default_source")]
    pub provider: String,
    #[serde(default)]
    pub leaguepedia: RawLeaguepedia,
    #[serde(default)]
    pub fixture: RawFixture,
}

impl Default for RawSource {
    fn default() -> Self {
        Self {
            provider: default_source(),
            leaguepedia: RawLeaguepedia::default(),
            fixture: RawFixture::default(),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawLeaguepedia {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for RawLeaguepedia {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Deserialize, Default)]
pub(super) struct RawFixture {
    #[serde(default)]
    pub path: Option<String>,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

pub(super) fn default_service_name() -> String { "League Custom Tracker API".to_string() }
pub(super) fn default_log_level() -> String { "info".to_string() }
pub(super) fn default_bind() -> String { "0.0.0.0:8000".to_string() }
pub(super) fn default_cors_origins() -> Vec<String> { vec!["http://localhost:3000".to_string()] }
pub(super) fn default_source() -> String { "leaguepedia".to_string() }
pub(super) fn default_api_url() -> String { "https://lol.fandom.com/api.php".to_string() }
pub(super) fn default_user_agent() -> String {
    concat!("league-tracker/", env!("CARGO_PKG_VERSION")).to_string()
}
pub(super) fn default_timeout_seconds() -> u64 { 30 }
pub(super) fn default_page_size() -> u32 { 500 }
