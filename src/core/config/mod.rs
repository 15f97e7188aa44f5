//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (or the file passed with `-f`), then applies `TRACKER_BIND` and
//! `TRACKER_LOG_LEVEL` env overrides.
//!
//! # Module layout
//!
//! - **types**: Public configuration structs (`Config`, `ServerConfig`,
//!   `SourceConfig`, …).
//! - **raw**: Raw TOML deserialization types. These mirror the file shape
//!   and use serde defaults; kept private.
//! - **load**: Loading logic: `merge_toml`, `load_raw_merged`, `load`,
//!   `load_from`, `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{expand_home, load, load_from};
pub use types::*;

impl Config {
    /// Offline `Config`: fixture source, loopback bind, no network calls.
    pub fn test_default(fixture_path: Option<&std::path::Path>) -> Self {
        Self {
            service_name: "test".into(),
            log_level: "info".into(),
            server: ServerConfig {
                bind: "127.0.0.1:0".into(),
                cors_origins: raw::default_cors_origins(),
            },
            source: SourceConfig {
                provider: "fixture".into(),
                leaguepedia: LeaguepediaConfig {
                    api_url: "http://127.0.0.1:0/api.php".into(),
                    user_agent: raw::default_user_agent(),
                    timeout_seconds: 1,
                    page_size: raw::default_page_size(),
                },
                fixture: FixtureConfig {
                    path: fixture_path.map(|p| p.to_path_buf()),
                },
            },
        }
    }
}
