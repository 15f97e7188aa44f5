//! Fixture source: serves canned data from a JSON file.
//!
//! Lets the API run offline and gives tests a deterministic source.
//! Anything absent from the file is a [`SourceError::NotFound`], which the
//! HTTP layer reports as a 500 like any other source failure.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::source::SourceError;
use crate::source::types::{Game, GameDetails, Tournament};

/// On-disk fixture layout. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct FixtureData {
    #[serde(default)]
    pub regions: Option<Vec<String>>,
    /// region → tournaments
    #[serde(default)]
    pub tournaments: HashMap<String, Vec<Tournament>>,
    /// overview page → games
    #[serde(default)]
    pub games: HashMap<String, Vec<Game>>,
    /// game id → details
    #[serde(default)]
    pub game_details: HashMap<String, GameDetails>,
    /// team name → logo URL
    #[serde(default)]
    pub team_logos: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct FixtureSource {
    data: Arc<FixtureData>,
}

impl FixtureSource {
    pub fn from_data(data: FixtureData) -> Self {
        Self { data: Arc::new(data) }
    }

    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SourceError::Fixture(format!("cannot read {}: {e}", path.display())))?;
        let data: FixtureData = serde_json::from_str(&text)
            .map_err(|e| SourceError::Fixture(format!("parse error in {}: {e}", path.display())))?;
        debug!(
            path = %path.display(),
            regions = data.regions.as_ref().map_or(0, Vec::len),
            tournaments = data.tournaments.len(),
            games = data.games.len(),
            "fixture loaded"
        );
        Ok(Self::from_data(data))
    }

    pub fn regions(&self) -> Result<Vec<String>, SourceError> {
        self.data
            .regions
            .clone()
            .ok_or_else(|| SourceError::NotFound("no regions in fixture".into()))
    }

    pub fn tournaments(&self, region: &str, year: Option<i32>) -> Result<Vec<Tournament>, SourceError> {
        let all = self
            .data
            .tournaments
            .get(region)
            .ok_or_else(|| SourceError::NotFound(format!("no tournaments for region '{region}'")))?;
        Ok(all
            .iter()
            .filter(|t| year.is_none() || t.year == year)
            .cloned()
            .collect())
    }

    pub fn games(&self, tournament: &str) -> Result<Vec<Game>, SourceError> {
        self.data
            .games
            .get(tournament)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("no games for tournament '{tournament}'")))
    }

    pub fn game_details(&self, game_id: &str) -> Result<GameDetails, SourceError> {
        self.data
            .game_details
            .get(game_id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("game '{game_id}'")))
    }

    pub fn team_logo(&self, team_name: &str) -> Result<String, SourceError> {
        self.data
            .team_logos
            .get(team_name)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("logo for team '{team_name}'")))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) fn sample() -> FixtureData {
        serde_json::from_value(serde_json::json!({
            "regions": ["EMEA", "Korea"],
            "tournaments": {
                "EMEA": [
                    { "name": "LEC 2023 Summer", "overviewPage": "LEC/2023 Season/Summer Season", "year": 2023 },
                    { "name": "LEC 2024 Spring", "overviewPage": "LEC/2024 Season/Spring Season", "year": 2024 }
                ]
            },
            "team_logos": { "G2 Esports": "https://static.wikia.nocookie.net/lolesports_gamepedia_en/images/G2.png" }
        }))
        .unwrap()
    }

    #[test]
    fn regions_returned_verbatim() {
        let s = FixtureSource::from_data(sample());
        assert_eq!(s.regions().unwrap(), vec!["EMEA".to_string(), "Korea".to_string()]);
    }

    #[test]
    fn missing_regions_is_not_found() {
        let s = FixtureSource::from_data(FixtureData::default());
        assert!(matches!(s.regions(), Err(SourceError::NotFound(_))));
    }

    #[test]
    fn tournaments_filter_by_year() {
        let s = FixtureSource::from_data(sample());
        let t = s.tournaments("EMEA", Some(2024)).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].overview_page, "LEC/2024 Season/Spring Season");
        assert!(s.tournaments("EMEA", Some(2019)).unwrap().is_empty());
    }

    #[test]
    fn unknown_region_errors_with_name() {
        let s = FixtureSource::from_data(sample());
        let err = s.tournaments("Atlantis", None).unwrap_err();
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn team_logo_lookup() {
        let s = FixtureSource::from_data(sample());
        assert!(s.team_logo("G2 Esports").unwrap().ends_with("G2.png"));
        assert!(s.team_logo("T1").is_err());
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(br#"{ "regions": ["China"] }"#).unwrap();
        let s = FixtureSource::load(f.path()).unwrap();
        assert_eq!(s.regions().unwrap(), vec!["China".to_string()]);
        assert!(s.games("LPL/2024 Season/Spring Season").is_err());
    }

    #[test]
    fn load_rejects_bad_json() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"{ regions: ").unwrap();
        let err = FixtureSource::load(f.path()).unwrap_err();
        assert!(matches!(err, SourceError::Fixture(ref m) if m.contains("parse error")));
    }

    #[test]
    fn shipped_sample_fixture_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/fixtures/sample.json");
        let s = FixtureSource::load(&path).unwrap();
        assert!(!s.regions().unwrap().is_empty());
    }
}
