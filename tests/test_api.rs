//! Router tests over the fixture source.
//!
//! Drives the axum router with `tower::ServiceExt::oneshot`, so no TCP
//! listener is needed.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use league_tracker::http::{AppState, build_router};
use league_tracker::source::DataSource;
use league_tracker::source::fixture::{FixtureData, FixtureSource};

const ORIGIN: &str = "http://localhost:3000";
const GAME_ID: &str = "LEC/2024 Season/Spring Season_Week 1_1_1";

fn fixture() -> FixtureData {
    serde_json::from_value(json!({
        "regions": ["EMEA", "Korea"],
        "tournaments": {
            "EMEA": [
                { "name": "LEC 2023 Summer", "overviewPage": "LEC/2023 Season/Summer Season", "year": 2023 },
                { "name": "LEC 2024 Spring", "overviewPage": "LEC/2024 Season/Spring Season", "year": 2024 }
            ]
        },
        "games": {
            "LEC/2024 Season/Spring Season": [
                { "gameId": GAME_ID, "team1": "G2 Esports", "team2": "Fnatic", "winner": "G2 Esports" }
            ]
        },
        "game_details": {
            GAME_ID: {
                "game": { "gameId": GAME_ID, "team1": "G2 Esports", "team2": "Fnatic" },
                "players": [{ "name": "Caps", "champion": "Orianna", "side": 1 }],
                "picksAndBans": null
            }
        },
        "team_logos": { "G2 Esports": "https://example.test/G2logo_square.png" }
    }))
    .unwrap()
}

fn router_with(data: FixtureData) -> Router {
    let source = DataSource::Fixture(FixtureSource::from_data(data));
    build_router(AppState::new(source), &[ORIGIN.to_string()])
}

fn router() -> Router {
    router_with(fixture())
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

// ── Liveness ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn root_reports_running() {
    let (status, body) = get(router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "League Custom Tracker API is running" }));
}

// ── Regions ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn regions_are_returned_verbatim() {
    let (status, body) = get(router(), "/regions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "regions": ["EMEA", "Korea"] }));
}

#[tokio::test]
async fn regions_failure_is_500_with_detail() {
    let (status, body) = get(router_with(FixtureData::default()), "/regions").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Failed to fetch regions: "));
    assert!(detail.contains("no regions in fixture"));
}

// ── Tournaments ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn tournaments_without_year_echo_null() {
    let (status, body) = get(router(), "/tournaments/EMEA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["region"], "EMEA");
    assert_eq!(body["year"], Value::Null);
    assert_eq!(body["tournaments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn tournaments_filter_by_year() {
    let (status, body) = get(router(), "/tournaments/EMEA?year=2024").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2024);
    let list = body["tournaments"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["overviewPage"], "LEC/2024 Season/Spring Season");
}

#[tokio::test]
async fn tournaments_year_zero_is_unfiltered_but_echoed() {
    let (status, body) = get(router(), "/tournaments/EMEA?year=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 0);
    assert_eq!(body["tournaments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn tournaments_non_integer_year_is_422() {
    let (status, body) = get(router(), "/tournaments/EMEA?year=twenty").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().is_some());
}

#[tokio::test]
async fn tournaments_unknown_region_is_500() {
    let (status, body) = get(router(), "/tournaments/Atlantis").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Failed to fetch tournaments: "));
    assert!(detail.contains("Atlantis"));
}

// ── Games ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn games_accept_encoded_overview_page() {
    let (status, body) = get(router(), "/games/LEC%2F2024%20Season%2FSpring%20Season").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tournament"], "LEC/2024 Season/Spring Season");
    assert_eq!(body["games"][0]["gameId"], GAME_ID);
    assert_eq!(body["games"][0]["winner"], "G2 Esports");
}

#[tokio::test]
async fn games_accept_raw_slashes() {
    let (status, body) = get(router(), "/games/LEC/2024%20Season/Spring%20Season").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tournament"], "LEC/2024 Season/Spring Season");
    assert_eq!(body["games"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn games_unknown_tournament_is_500() {
    let (status, body) = get(router(), "/games/Nowhere%20Cup").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().starts_with("Failed to fetch games: "));
}

// ── Game details ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn game_details_by_query_id() {
    let uri = "/game-details?game_id=LEC%2F2024%20Season%2FSpring%20Season_Week%201_1_1";
    let (status, body) = get(router(), uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["game_id"], GAME_ID);
    assert_eq!(body["details"]["game"]["team2"], "Fnatic");
    assert_eq!(body["details"]["players"][0]["champion"], "Orianna");
    assert_eq!(body["details"]["picksAndBans"], Value::Null);
}

#[tokio::test]
async fn game_details_unknown_id_is_500() {
    let (status, body) = get(router(), "/game-details?game_id=missing").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Failed to fetch game details: "));
    assert!(detail.contains("missing"));
}

#[tokio::test]
async fn game_details_without_id_is_422() {
    let (status, _) = get(router(), "/game-details").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// ── Team logo ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn team_logo_found() {
    let (status, body) = get(router(), "/team-logo/G2%20Esports").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "team_name": "G2 Esports", "logo_url": "https://example.test/G2logo_square.png" })
    );
}

#[tokio::test]
async fn team_logo_missing_is_500() {
    let (status, body) = get(router(), "/team-logo/T1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().starts_with("Failed to fetch team logo: "));
}

// ── CORS ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn cors_preflight_allows_configured_origin_with_credentials() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/regions")
        .header(header::ORIGIN, ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = router().oneshot(request).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn cors_rejects_other_origins() {
    let request = Request::builder()
        .uri("/regions")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
