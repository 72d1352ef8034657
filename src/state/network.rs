use crate::state::messages::{NetworkRequest, NetworkResponse};
use frag_api::client::GamesApi;
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

/// Global loading indicator, driven only by full-list fetches. While
/// `is_loading` is set the refresh key is ignored and the header shows
/// the spinner. Detail and ranking fetches are tracked per game id on
/// the app side instead.
#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    client: GamesApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: GamesApi::new(),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let is_list_fetch = matches!(request, NetworkRequest::LoadGames);
            if is_list_fetch {
                self.start_loading_animation().await;
            }

            let response = match request {
                NetworkRequest::LoadGames => self.handle_load_games().await,
                NetworkRequest::LoadGameDetail { game_id } => {
                    self.handle_load_game_detail(game_id).await
                }
                NetworkRequest::LoadGameRanking { game_id } => {
                    self.handle_load_game_ranking(game_id).await
                }
            };

            debug!("network request complete");
            if is_list_fetch {
                let is_ok = !matches!(response, NetworkResponse::GamesLoadFailed { .. });
                self.stop_loading_animation(is_ok).await;
            }

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_games(&self) -> NetworkResponse {
        debug!("loading game list");
        match self.client.fetch_games().await {
            Ok(games) => NetworkResponse::GamesLoaded { games },
            Err(e) => NetworkResponse::GamesLoadFailed { message: e.to_string() },
        }
    }

    async fn handle_load_game_detail(&self, game_id: String) -> NetworkResponse {
        debug!("loading detail for {game_id}");
        match self.client.fetch_game_detail(&game_id).await {
            Ok(detail) => NetworkResponse::GameDetailLoaded {
                game_id,
                detail: Box::new(detail),
            },
            Err(e) => {
                let message = e.to_string();
                NetworkResponse::GameDetailFailed { game_id, message }
            }
        }
    }

    async fn handle_load_game_ranking(&self, game_id: String) -> NetworkResponse {
        debug!("refreshing ranking for {game_id}");
        match self.client.fetch_game_ranking(&game_id).await {
            Ok(ranking) => NetworkResponse::RankingLoaded { game_id, ranking },
            Err(e) => {
                let message = e.to_string();
                NetworkResponse::RankingFailed { game_id, message }
            }
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
