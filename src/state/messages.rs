use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use frag_api::{Game, RankingEntry};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadGames,
    LoadGameDetail { game_id: String },
    LoadGameRanking { game_id: String },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    GamesLoaded { games: Vec<Game> },
    GamesLoadFailed { message: String },
    GameDetailLoaded { game_id: String, detail: Box<Game> },
    /// Failures carry the game id so the per-row loading flag always clears.
    GameDetailFailed { game_id: String, message: String },
    RankingLoaded { game_id: String, ranking: Vec<RankingEntry> },
    RankingFailed { game_id: String, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
