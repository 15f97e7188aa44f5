//! Esports data source abstraction.
//!
//! `DataSource` is an enum over concrete sources. The HTTP layer only ever
//! sees this type and its five operations; where the data comes from is
//! decided once at startup by [`build`].
//!
//! Sources are shared immutable capabilities; clone them freely.

pub mod fixture;
pub mod leaguepedia;
pub mod types;

use thiserror::Error;
use tracing::info;

use crate::config::SourceConfig;

pub use types::{Game, GameDetails, PicksAndBans, PlayerStats, Tournament};

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unknown source: {0}")]
    UnknownSource(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("wiki API error [{code}]: {info}")]
    Api { code: String, info: String },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("fixture error: {0}")]
    Fixture(String),
}

// ── Source enum ───────────────────────────────────────────────────────────────

/// All available data sources.
///
/// Adding a source = new module + new variant + new arm in each operation.
#[derive(Debug, Clone)]
pub enum DataSource {
    Leaguepedia(leaguepedia::LeaguepediaClient),
    Fixture(fixture::FixtureSource),
}

impl DataSource {
    /// Short name for logs and the startup banner.
    pub fn name(&self) -> &'static str {
        match self {
            DataSource::Leaguepedia(_) => "leaguepedia",
            DataSource::Fixture(_) => "fixture",
        }
    }

    /// Every region that has at least one tournament.
    pub async fn regions(&self) -> Result<Vec<String>, SourceError> {
        match self {
            DataSource::Leaguepedia(s) => s.regions().await,
            DataSource::Fixture(s) => s.regions(),
        }
    }

    /// Tournaments for `region`. `year` of `None` or `Some(0)` means all years.
    pub async fn tournaments(&self, region: &str, year: Option<i32>) -> Result<Vec<Tournament>, SourceError> {
        let year = year.filter(|y| *y != 0);
        match self {
            DataSource::Leaguepedia(s) => s.tournaments(region, year).await,
            DataSource::Fixture(s) => s.tournaments(region, year),
        }
    }

    /// Games played in the tournament with the given overview page.
    pub async fn games(&self, tournament: &str) -> Result<Vec<Game>, SourceError> {
        match self {
            DataSource::Leaguepedia(s) => s.games(tournament).await,
            DataSource::Fixture(s) => s.games(tournament),
        }
    }

    pub async fn game_details(&self, game_id: &str) -> Result<GameDetails, SourceError> {
        match self {
            DataSource::Leaguepedia(s) => s.game_details(game_id).await,
            DataSource::Fixture(s) => s.game_details(game_id),
        }
    }

    /// URL of the team's square logo.
    pub async fn team_logo(&self, team_name: &str) -> Result<String, SourceError> {
        match self {
            DataSource::Leaguepedia(s) => s.team_logo(team_name).await,
            DataSource::Fixture(s) => s.team_logo(team_name),
        }
    }
}

/// Construct the configured `DataSource`. Called once at startup.
pub fn build(config: &SourceConfig) -> Result<DataSource, SourceError> {
    let source = match config.provider.as_str() {
        "leaguepedia" => DataSource::Leaguepedia(leaguepedia::LeaguepediaClient::new(&config.leaguepedia)?),
        "fixture" => {
            let path = config.fixture.path.as_deref().ok_or_else(|| {
                SourceError::Fixture("source.fixture.path is required for the fixture source".into())
            })?;
            DataSource::Fixture(fixture::FixtureSource::load(path)?)
        }
        other => return Err(SourceError::UnknownSource(other.to_string())),
    };
    info!(source = source.name(), "data source ready");
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn build_leaguepedia_from_defaults() {
        let mut cfg = Config::test_default(None).source;
        cfg.provider = "leaguepedia".into();
        let source = build(&cfg).unwrap();
        assert_eq!(source.name(), "leaguepedia");
    }

    #[test]
    fn build_unknown_source_errors() {
        let mut cfg = Config::test_default(None).source;
        cfg.provider = "scraper".into();
        let err = build(&cfg).unwrap_err();
        assert!(matches!(err, SourceError::UnknownSource(ref s) if s == "scraper"));
    }

    #[test]
    fn build_fixture_without_path_errors() {
        let cfg = Config::test_default(None).source;
        let err = build(&cfg).unwrap_err();
        assert!(err.to_string().contains("source.fixture.path"));
    }

    #[test]
    fn api_error_display_carries_code_and_info() {
        let e = SourceError::Api { code: "badparam".into(), info: "Unknown table".into() };
        assert_eq!(e.to_string(), "wiki API error [badparam]: Unknown table");
    }

    #[tokio::test]
    async fn year_zero_means_all_years() {
        let source = DataSource::Fixture(fixture::FixtureSource::from_data(fixture::tests::sample()));
        let all = source.tournaments("EMEA", None).await.unwrap();
        let zero = source.tournaments("EMEA", Some(0)).await.unwrap();
        assert_eq!(all, zero);
        assert_eq!(all.len(), 2);
    }
}
