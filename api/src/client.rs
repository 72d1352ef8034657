use crate::wire::{GameRecord, RankingRecord};
use crate::{Game, RankingEntry};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
const BASE_URL_ENV: &str = "FRAGBOARD_API_URL";

/// Match-stats API client backed by the dashboard's REST endpoints.
#[derive(Debug, Clone)]
pub struct GamesApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for GamesApi {
    fn default() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self::with_base_url(base_url)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl GamesApi {
    /// Base URL from `FRAGBOARD_API_URL`, falling back to the local default.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::builder()
                .user_agent("fragboard/0.1 (terminal match-stats viewer)")
                .build()
                .unwrap_or_default(),
            base_url,
            timeout: Duration::from_secs(10),
        }
    }

    /// Fetch the full list of game records.
    pub async fn fetch_games(&self) -> ApiResult<Vec<Game>> {
        let url = format!("{}/api/games", self.base_url);
        let raw: Vec<GameRecord> = self.get(&url).await?;
        Ok(raw.into_iter().map(map_game).collect())
    }

    /// Fetch one fully populated game record.
    pub async fn fetch_game_detail(&self, game_id: &str) -> ApiResult<Game> {
        let url = format!("{}/api/games/{game_id}", self.base_url);
        let raw: GameRecord = self.get(&url).await?;
        let mut game = map_game(raw);
        if game.id.is_empty() {
            // Some backends omit the id from the detail body.
            game.id = game_id.to_owned();
        }
        Ok(game)
    }

    /// Fetch the current ranking for one game.
    pub async fn fetch_game_ranking(&self, game_id: &str) -> ApiResult<Vec<RankingEntry>> {
        let url = format!("{}/api/games/{game_id}/ranking", self.base_url);
        let raw: Vec<RankingRecord> = self.get(&url).await?;
        Ok(raw.into_iter().map(map_ranking_entry).collect())
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_game(raw: GameRecord) -> Game {
    Game {
        id: raw.id.unwrap_or_default(),
        total_kills: raw.total_kills.unwrap_or_default(),
        players: raw.players.unwrap_or_default(),
        kills: raw.kills.unwrap_or_default(),
        kills_by_means: raw.kills_by_means.unwrap_or_default(),
        world_kills: raw.world_kills.unwrap_or_default(),
        ranking: raw
            .ranking
            .unwrap_or_default()
            .into_iter()
            .map(map_ranking_entry)
            .collect(),
    }
}

fn map_ranking_entry(raw: RankingRecord) -> RankingEntry {
    RankingEntry {
        name: raw.name.unwrap_or_default(),
        score: raw.score.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME_LIST_BODY: &str = r#"[
        {
            "id": "game_1",
            "total_kills": 45,
            "players": {"2": "Isgalamido", "3": "Mocinha"},
            "kills": {"2": -5, "3": 0},
            "kills_by_means": {"MOD_TRIGGER_HURT": 9},
            "world_kills": 8,
            "ranking": [{"name": "Mocinha", "score": 0}, {"name": "Isgalamido", "score": -5}]
        },
        {
            "id": "game_2",
            "total_kills": 4
        }
    ]"#;

    #[tokio::test]
    async fn fetch_games_maps_list_records() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/games")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(GAME_LIST_BODY)
            .create_async()
            .await;

        let api = GamesApi::with_base_url(server.url());
        let games = api.fetch_games().await.expect("list fetch should succeed");

        mock.assert_async().await;
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].id, "game_1");
        assert_eq!(games[0].total_kills, 45);
        assert_eq!(games[0].players.get("2").map(String::as_str), Some("Isgalamido"));
        assert_eq!(games[0].kills.get("2"), Some(&-5));
        assert_eq!(games[0].ranking[0].name, "Mocinha");
        // Sparse record: missing maps degrade to empty, not an error.
        assert_eq!(games[1].id, "game_2");
        assert!(games[1].players.is_empty());
        assert!(games[1].ranking.is_empty());
    }

    #[tokio::test]
    async fn fetch_game_detail_fills_missing_id_from_request() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/games/game_5")
            .with_status(200)
            .with_body(r#"{"total_kills": 7, "players": {"4": "Zeh"}}"#)
            .create_async()
            .await;

        let api = GamesApi::with_base_url(server.url());
        let detail = api.fetch_game_detail("game_5").await.expect("detail fetch");
        assert_eq!(detail.id, "game_5");
        assert_eq!(detail.total_kills, 7);
    }

    #[tokio::test]
    async fn fetch_game_ranking_maps_entries_in_server_order() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/games/game_1/ranking")
            .with_status(200)
            .with_body(r#"[{"name": "Zeh", "score": 20}, {"name": "Dono", "score": 3}]"#)
            .create_async()
            .await;

        let api = GamesApi::with_base_url(server.url());
        let ranking = api.fetch_game_ranking("game_1").await.expect("ranking fetch");
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].name, "Zeh");
        assert_eq!(ranking[1].score, 3);
    }

    #[tokio::test]
    async fn http_error_status_maps_to_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/games")
            .with_status(500)
            .create_async()
            .await;

        let api = GamesApi::with_base_url(server.url());
        match api.fetch_games().await {
            Err(ApiError::Api(_, url)) => assert!(url.ends_with("/api/games")),
            other => panic!("expected ApiError::Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_maps_to_parsing_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/games")
            .with_status(200)
            .with_body(r#"{"not": "an array"}"#)
            .create_async()
            .await;

        let api = GamesApi::with_base_url(server.url());
        match api.fetch_games().await {
            Err(ApiError::Parsing(_, _)) => {}
            other => panic!("expected ApiError::Parsing, got {other:?}"),
        }
    }

    #[test]
    fn base_url_trailing_slashes_are_trimmed() {
        let api = GamesApi::with_base_url("http://localhost:9000//");
        assert_eq!(api.base_url, "http://localhost:9000");
    }
}
