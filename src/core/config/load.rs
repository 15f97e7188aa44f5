//! Configuration loading with env-var overrides.
//!
//! Reads TOML files, supports `[meta] base = "..."` inheritance chains,
//! and applies `TRACKER_BIND` and `TRACKER_LOG_LEVEL` env overrides.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;

use super::raw::RawConfig;
use super::types::*;

/// Hard ceiling the wiki applies to `cargoquery` limits for anonymous clients.
const MAX_PAGE_SIZE: u32 = 500;

/// Deep-merge two TOML values.
/// Tables merge key by key; any other overlay value replaces the base value.
fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_tbl), toml::Value::Table(overlay_tbl)) => {
            for (key, ov_val) in overlay_tbl {
                let merged = match base_tbl.remove(&key) {
                    Some(base_val) => merge_toml(base_val, ov_val),
                    None => ov_val,
                };
                base_tbl.insert(key, merged);
            }
            toml::Value::Table(base_tbl)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file, follow its `[meta] base` chain, and return the merged
/// value. `visited` holds canonical paths already seen so cycles fail fast.
fn load_raw_merged(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<toml::Value, AppError> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical) {
        return Err(AppError::Config(format!(
            "circular base reference detected at: {}",
            path.display()
        )));
    }

    let text = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let overlay: toml::Value = toml::from_str(&text)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let Some(base_str) = overlay
        .get("meta")
        .and_then(|m| m.get("base"))
        .and_then(|b| b.as_str())
    else {
        return Ok(overlay);
    };

    let base_path = if Path::new(base_str).is_absolute() {
        PathBuf::from(base_str)
    } else {
        path.parent().unwrap_or(Path::new(".")).join(base_str)
    };
    let base = load_raw_merged(&base_path, visited)?;
    Ok(merge_toml(base, overlay))
}

/// Load config from the given path, or `config/default.toml`, then apply
/// env-var overrides. Without an explicit path and without the default file,
/// the built-in defaults are used.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let bind_override = env::var("TRACKER_BIND").ok();
    let log_level_override = env::var("TRACKER_LOG_LEVEL").ok();

    let path = match config_path {
        Some(p) => Path::new(p),
        None => Path::new("config/default.toml"),
    };

    if config_path.is_none() && !path.exists() {
        return Ok(resolve(
            RawConfig::default(),
            bind_override.as_deref(),
            log_level_override.as_deref(),
        ));
    }

    load_from(path, bind_override.as_deref(), log_level_override.as_deref())
}

/// Internal loader. Accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    bind_override: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Config, AppError> {
    let merged = load_raw_merged(path, &mut HashSet::new())?;

    let parsed: RawConfig = Deserialize::deserialize(merged).map_err(|e: toml::de::Error| {
        AppError::Config(format!("config error in {}: {e}", path.display()))
    })?;

    Ok(resolve(parsed, bind_override, log_level_override))
}

fn resolve(raw: RawConfig, bind_override: Option<&str>, log_level_override: Option<&str>) -> Config {
    let lp = raw.source.leaguepedia;

    Config {
        service_name: raw.service.name,
        log_level: log_level_override.map(str::to_string).unwrap_or(raw.service.log_level),
        server: ServerConfig {
            bind: bind_override.map(str::to_string).unwrap_or(raw.server.bind),
            cors_origins: raw.server.cors_origins,
        },
        source: SourceConfig {
            provider: raw.source.provider,
            leaguepedia: LeaguepediaConfig {
                api_url: lp.api_url,
                user_agent: lp.user_agent,
                timeout_seconds: lp.timeout_seconds.max(1),
                page_size: lp.page_size.clamp(1, MAX_PAGE_SIZE),
            },
            fixture: FixtureConfig {
                path: raw.source.fixture.path.as_deref().map(expand_home),
            },
        },
    }
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
