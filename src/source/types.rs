//! Domain types returned by every data source.
//!
//! Field names serialize in camelCase. Values the wiki leaves blank are
//! `None` and serialize as `null`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One tournament, identified by its wiki overview page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub name: String,
    /// Wiki page title; the key `games` expects.
    pub overview_page: String,
    pub league: Option<String>,
    pub league_short: Option<String>,
    pub region: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub year: Option<i32>,
    pub tournament_level: Option<String>,
    #[serde(default)]
    pub is_qualifier: bool,
    #[serde(default)]
    pub is_playoffs: bool,
    #[serde(default)]
    pub is_official: bool,
    pub rulebook: Option<String>,
}

/// One game (a single map of a series).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_id: String,
    pub match_id: Option<String>,
    pub tournament: Option<String>,
    pub overview_page: Option<String>,
    /// Blue side.
    pub team1: Option<String>,
    /// Red side.
    pub team2: Option<String>,
    /// Winning team name.
    pub winner: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub duration_seconds: Option<u32>,
    pub patch: Option<String>,
    pub game_in_match: Option<u32>,
    pub riot_platform_game_id: Option<String>,
}

/// Per-player scoreboard line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub name: String,
    pub team: Option<String>,
    pub champion: Option<String>,
    pub role: Option<String>,
    /// 1 = blue, 2 = red.
    pub side: Option<u8>,
    pub kills: Option<u32>,
    pub deaths: Option<u32>,
    pub assists: Option<u32>,
    pub gold: Option<u32>,
    pub cs: Option<u32>,
    pub damage_to_champions: Option<u64>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub summoner_spells: Vec<String>,
}

/// Draft for one game, in pick/ban order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicksAndBans {
    pub team1_bans: Vec<String>,
    pub team2_bans: Vec<String>,
    pub team1_picks: Vec<String>,
    pub team2_picks: Vec<String>,
}

/// Everything known about a single game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetails {
    pub game: Game,
    #[serde(default)]
    pub players: Vec<PlayerStats>,
    pub picks_and_bans: Option<PicksAndBans>,
}
