//! Leaguepedia client: reads esports data from the League of Legends
//! esports wiki through the MediaWiki API.
//!
//! Tabular data comes from `action=cargoquery`; team logos come from
//! `action=query&prop=imageinfo`. All wire types are private to this module.
//! Callers only see the domain types in [`crate::source::types`].

mod cargo;
mod decode;

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, trace, warn};

use crate::config::LeaguepediaConfig;
use crate::source::SourceError;
use crate::source::types::{Game, GameDetails, PicksAndBans, PlayerStats, Tournament};

use cargo::{CargoQuery, CargoResponse, ErrorEnvelope, quote};
use decode::cell;

/// Upper bound on pages fetched for one query. At 500 rows per page this is
/// far above any real tournament.
pub const MAX_PAGES: usize = 40;

const TOURNAMENT_FIELDS: &[&str] = &[
    "T.Name=Name",
    "T.OverviewPage=OverviewPage",
    "T.League=League",
    "L.League_Short=LeagueShort",
    "T.Region=Region",
    "T.DateStart=DateStart",
    "T.Date=DateEnd",
    "T.Year=Year",
    "T.TournamentLevel=TournamentLevel",
    "T.IsQualifier=IsQualifier",
    "T.IsPlayoffs=IsPlayoffs",
    "T.IsOfficial=IsOfficial",
    "T.Rulebook=Rulebook",
];

const GAME_FIELDS: &[&str] = &[
    "SG.GameId=GameId",
    "SG.MatchId=MatchId",
    "SG.Tournament=Tournament",
    "SG.OverviewPage=OverviewPage",
    "SG.Team1=Team1",
    "SG.Team2=Team2",
    "SG.WinTeam=WinTeam",
    "SG.DateTime_UTC=DateTimeUTC",
    "SG.Gamelength=Gamelength",
    "SG.Patch=Patch",
    "SG.N_GameInMatch=GameInMatch",
    "MSG.RiotPlatformGameId=RiotPlatformGameId",
];

const PLAYER_FIELDS: &[&str] = &[
    "SP.Link=Name",
    "SP.Team=Team",
    "SP.Champion=Champion",
    "SP.Role=Role",
    "SP.Side=Side",
    "SP.Kills=Kills",
    "SP.Deaths=Deaths",
    "SP.Assists=Assists",
    "SP.Gold=Gold",
    "SP.CS=CS",
    "SP.DamageToChampions=DamageToChampions",
    "SP.Items=Items",
    "SP.SummonerSpells=SummonerSpells",
];

// ── Public client ─────────────────────────────────────────────────────────────

/// Constructed once at startup, then cheaply cloned because
/// `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct LeaguepediaClient {
    client: Client,
    api_url: String,
    page_size: u32,
}

impl LeaguepediaClient {
    pub fn new(config: &LeaguepediaConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SourceError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            page_size: config.page_size,
        })
    }

    pub async fn regions(&self) -> Result<Vec<String>, SourceError> {
        let query = CargoQuery::new("Tournaments", &["Tournaments.Region=Region"])
            .group_by("Tournaments.Region");
        let rows: Vec<RegionRow> = self.cargo_query(&query).await?;
        Ok(rows.into_iter().filter_map(|r| r.region).collect())
    }

    pub async fn tournaments(&self, region: &str, year: Option<i32>) -> Result<Vec<Tournament>, SourceError> {
        let mut clause = format!(
            "L.Level = 'Primary' AND T.IsOfficial = 1 AND T.Region = {}",
            quote(region)
        );
        if let Some(year) = year {
            clause.push_str(&format!(" AND T.Year = {year}"));
        }
        let query = CargoQuery::new("Tournaments=T, Leagues=L", TOURNAMENT_FIELDS)
            .join_on("T.League = L.League")
            .filter(clause)
            .order_by("T.DateStart");
        let rows: Vec<TournamentRow> = self.cargo_query(&query).await?;
        Ok(rows.into_iter().filter_map(TournamentRow::into_tournament).collect())
    }

    pub async fn games(&self, tournament: &str) -> Result<Vec<Game>, SourceError> {
        let query = games_query(format!("SG.OverviewPage = {}", quote(tournament)));
        let rows: Vec<GameRow> = self.cargo_query(&query).await?;
        Ok(rows.into_iter().filter_map(GameRow::into_game).collect())
    }

    /// The game row, its scoreboard lines and its draft, fetched concurrently.
    pub async fn game_details(&self, game_id: &str) -> Result<GameDetails, SourceError> {
        let quoted = quote(game_id);

        let game_query = games_query(format!("SG.GameId = {quoted}"));
        let players_query = CargoQuery::new("ScoreboardPlayers=SP", PLAYER_FIELDS)
            .filter(format!("SP.GameId = {quoted}"))
            .order_by("SP.Side, SP.Role_Number");
        let pb_fields = picks_and_bans_fields();
        let pb_query = CargoQuery::new("PicksAndBansS7=PB", &pb_fields)
            .filter(format!("PB.GameId = {quoted}"));

        let (games, players, drafts) = tokio::try_join!(
            self.cargo_query::<GameRow>(&game_query),
            self.cargo_query::<PlayerRow>(&players_query),
            self.cargo_query::<HashMap<String, serde_json::Value>>(&pb_query),
        )?;

        let game = games
            .into_iter()
            .find_map(GameRow::into_game)
            .ok_or_else(|| SourceError::NotFound(format!("game '{game_id}'")))?;

        Ok(GameDetails {
            game,
            players: players.into_iter().filter_map(PlayerRow::into_stats).collect(),
            picks_and_bans: drafts.into_iter().next().map(|row| picks_and_bans(&row)),
        })
    }

    /// URL of `File:<team>logo square.png`. A miss retries once under the
    /// team's canonical page name from `TeamRedirects`.
    pub async fn team_logo(&self, team_name: &str) -> Result<String, SourceError> {
        if let Some(url) = self.logo_url(team_name).await? {
            return Ok(url);
        }

        let canonical = self.canonical_team_name(team_name).await?;
        match canonical {
            Some(name) if name != team_name => {
                debug!(%team_name, canonical = %name, "retrying logo lookup under canonical name");
                self.logo_url(&name)
                    .await?
                    .ok_or_else(|| SourceError::NotFound(format!("logo for team '{team_name}'")))
            }
            _ => Err(SourceError::NotFound(format!("logo for team '{team_name}'"))),
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    async fn logo_url(&self, team_name: &str) -> Result<Option<String>, SourceError> {
        let params = [
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("titles", format!("File:{team_name}logo square.png")),
            ("prop", "imageinfo".to_string()),
            ("iiprop", "url".to_string()),
        ];
        let body = self.get_json(&params).await?;
        let parsed: ImageQueryResponse = serde_json::from_value(body)
            .map_err(|e| SourceError::Decode(format!("imageinfo response: {e}")))?;

        Ok(parsed
            .query
            .map(|q| q.pages)
            .unwrap_or_default()
            .into_values()
            .flat_map(|page| page.imageinfo)
            .map(|info| info.url)
            .next())
    }

    async fn canonical_team_name(&self, team_name: &str) -> Result<Option<String>, SourceError> {
        let query = CargoQuery::new("TeamRedirects", &["TeamRedirects._pageName=Team"])
            .filter(format!("TeamRedirects.AllName = {}", quote(team_name)));
        let rows: Vec<TeamRedirectRow> = self.cargo_page(&query, 1, 0).await?;
        Ok(rows.into_iter().find_map(|r| r.team))
    }

    /// Run `query` to completion, following `offset` paging.
    async fn cargo_query<T: DeserializeOwned>(&self, query: &CargoQuery) -> Result<Vec<T>, SourceError> {
        let mut rows = Vec::new();
        for page in 0..MAX_PAGES {
            let batch: Vec<T> = self.cargo_page(query, self.page_size, rows.len()).await?;
            let n = batch.len();
            rows.extend(batch);
            if n < self.page_size as usize {
                return Ok(rows);
            }
            trace!(tables = query.tables(), page, fetched = rows.len(), "fetching next cargo page");
        }
        warn!(tables = query.tables(), rows = rows.len(), "cargo page limit reached, result truncated");
        Ok(rows)
    }

    async fn cargo_page<T: DeserializeOwned>(
        &self,
        query: &CargoQuery,
        limit: u32,
        offset: usize,
    ) -> Result<Vec<T>, SourceError> {
        let body = self.get_json(&query.params(limit, offset)).await?;
        let parsed: CargoResponse<T> = serde_json::from_value(body).map_err(|e| {
            error!(tables = query.tables(), error = %e, "failed to decode cargo rows");
            SourceError::Decode(format!("cargo rows from {}: {e}", query.tables()))
        })?;
        debug!(tables = query.tables(), offset, rows = parsed.cargoquery.len(), "cargo page received");
        Ok(parsed.cargoquery.into_iter().map(|r| r.title).collect())
    }

    /// GET `api.php` with `params`; maps transport, status and MediaWiki
    /// error envelopes to [`SourceError`].
    async fn get_json(&self, params: &[(&str, String)]) -> Result<serde_json::Value, SourceError> {
        trace!(url = %self.api_url, ?params, "wiki request");

        let response = self
            .client
            .get(&self.api_url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.api_url, error = %e, "wiki HTTP request failed (transport)");
                SourceError::Request(e.to_string())
            })?;

        let response = check_status(response).await?;

        let body: serde_json::Value = response.json().await.map_err(|e| {
            error!(error = %e, "wiki response is not JSON");
            SourceError::Decode(format!("failed to parse response body: {e}"))
        })?;

        if body.get("error").is_some() {
            if let Ok(env) = serde_json::from_value::<ErrorEnvelope>(body.clone()) {
                error!(code = %env.error.code, info = %env.error.info, "wiki API returned an error");
                return Err(SourceError::Api { code: env.error.code, info: env.error.info });
            }
        }

        Ok(body)
    }
}

/// Consume the response and return it if successful, or a `Request` error
/// carrying the status and body.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    error!(%status, "wiki request returned HTTP error");
    Err(SourceError::Request(format!("HTTP {status}: {}", body.trim())))
}

fn games_query(clause: String) -> CargoQuery {
    CargoQuery::new("ScoreboardGames=SG, MatchScheduleGame=MSG", GAME_FIELDS)
        .join_on("SG.GameId = MSG.GameId")
        .filter(clause)
        .order_by("SG.DateTime_UTC")
}

fn picks_and_bans_fields() -> Vec<String> {
    let mut fields = Vec::with_capacity(20);
    for team in 1..=2 {
        for kind in ["Ban", "Pick"] {
            for n in 1..=5 {
                fields.push(format!("PB.Team{team}{kind}{n}=Team{team}{kind}{n}"));
            }
        }
    }
    fields
}

fn picks_and_bans(row: &HashMap<String, serde_json::Value>) -> PicksAndBans {
    let column = |team: u8, kind: &str| -> Vec<String> {
        (1..=5)
            .filter_map(|n| row.get(&format!("Team{team}{kind}{n}")))
            .filter_map(|v| v.as_str())
            .filter_map(decode::text)
            // Leaguepedia marks skipped bans with "None".
            .filter(|c| !c.eq_ignore_ascii_case("none"))
            .collect()
    };
    PicksAndBans {
        team1_bans: column(1, "Ban"),
        team2_bans: column(2, "Ban"),
        team1_picks: column(1, "Pick"),
        team2_picks: column(2, "Pick"),
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RegionRow {
    #[serde(rename = "Region", default, deserialize_with = "cell")]
    region: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TeamRedirectRow {
    #[serde(rename = "Team", default, deserialize_with = "cell")]
    team: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TournamentRow {
    #[serde(default, deserialize_with = "cell")]
    name: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    overview_page: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    league: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    league_short: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    region: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    date_start: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    date_end: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    year: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    tournament_level: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    is_qualifier: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    is_playoffs: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    is_official: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    rulebook: Option<String>,
}

impl TournamentRow {
    /// Rows without an overview page cannot be queried further and are dropped.
    fn into_tournament(self) -> Option<Tournament> {
        let overview_page = self.overview_page?;
        Some(Tournament {
            name: self.name.unwrap_or_else(|| overview_page.clone()),
            overview_page,
            league: self.league,
            league_short: self.league_short,
            region: self.region,
            start: decode::date(self.date_start.as_deref()),
            end: decode::date(self.date_end.as_deref()),
            year: decode::int(self.year.as_deref()),
            tournament_level: self.tournament_level,
            is_qualifier: decode::flag(self.is_qualifier.as_deref()),
            is_playoffs: decode::flag(self.is_playoffs.as_deref()),
            is_official: decode::flag(self.is_official.as_deref()),
            rulebook: self.rulebook,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GameRow {
    #[serde(default, deserialize_with = "cell")]
    game_id: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    match_id: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    tournament: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    overview_page: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    team1: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    team2: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    win_team: Option<String>,
    #[serde(rename = "DateTimeUTC", default, deserialize_with = "cell")]
    date_time_utc: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    gamelength: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    patch: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    game_in_match: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    riot_platform_game_id: Option<String>,
}

impl GameRow {
    fn into_game(self) -> Option<Game> {
        Some(Game {
            game_id: self.game_id?,
            match_id: self.match_id,
            tournament: self.tournament,
            overview_page: self.overview_page,
            team1: self.team1,
            team2: self.team2,
            winner: self.win_team,
            start: decode::timestamp(self.date_time_utc.as_deref()),
            duration_seconds: decode::duration_seconds(self.gamelength.as_deref()),
            patch: self.patch,
            game_in_match: decode::int(self.game_in_match.as_deref()),
            riot_platform_game_id: self.riot_platform_game_id,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PlayerRow {
    #[serde(default, deserialize_with = "cell")]
    name: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    team: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    champion: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    role: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    side: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    kills: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    deaths: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    assists: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    gold: Option<String>,
    #[serde(rename = "CS", default, deserialize_with = "cell")]
    cs: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    damage_to_champions: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    items: Option<String>,
    #[serde(default, deserialize_with = "cell")]
    summoner_spells: Option<String>,
}

impl PlayerRow {
    fn into_stats(self) -> Option<PlayerStats> {
        Some(PlayerStats {
            name: self.name?,
            team: self.team,
            champion: self.champion,
            role: self.role,
            side: decode::int(self.side.as_deref()),
            kills: decode::int(self.kills.as_deref()),
            deaths: decode::int(self.deaths.as_deref()),
            assists: decode::int(self.assists.as_deref()),
            gold: decode::int(self.gold.as_deref()),
            cs: decode::int(self.cs.as_deref()),
            damage_to_champions: decode::int(self.damage_to_champions.as_deref()),
            items: decode::list(self.items.as_deref()),
            summoner_spells: decode::list(self.summoner_spells.as_deref()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ImageQueryResponse {
    #[serde(default)]
    query: Option<ImageQuery>,
}

#[derive(Debug, Deserialize)]
struct ImageQuery {
    #[serde(default)]
    pages: HashMap<String, ImagePage>,
}

#[derive(Debug, Deserialize)]
struct ImagePage {
    #[serde(default)]
    imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Deserialize)]
struct ImageInfo {
    url: String,
}
