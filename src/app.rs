use crate::state::app_settings::AppSettings;
use crate::state::app_state::{DashboardState, SortField};
use crate::state::messages::NetworkRequest;
use frag_api::{Game, RankingEntry};

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

#[derive(Default)]
pub struct AppState {
    pub dashboard: DashboardState,
    pub show_logs: bool,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let app = Self { state: AppState::default(), settings };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_games_loaded(&mut self, games: Vec<Game>) {
        self.state.dashboard.on_games_loaded(games);
    }

    pub fn on_game_detail_loaded(&mut self, game_id: &str, detail: &Game) {
        self.state.dashboard.on_game_detail_loaded(game_id, detail);
    }

    pub fn on_game_detail_failed(&mut self, game_id: &str) {
        self.state.dashboard.on_game_detail_failed(game_id);
    }

    pub fn on_ranking_loaded(&mut self, game_id: &str, ranking: Vec<RankingEntry>) {
        self.state.dashboard.on_ranking_loaded(game_id, ranking);
    }

    // -----------------------------------------------------------------------
    // User actions — delegated to DashboardState, returning the network
    // request (if any) the caller must dispatch
    // -----------------------------------------------------------------------

    /// Expand or collapse the row under the cursor.
    pub fn toggle_selected_details(&mut self) -> Option<NetworkRequest> {
        let game_id = self.state.dashboard.selected_game_id()?;
        self.state.dashboard.toggle_game_details(&game_id)
    }

    /// Re-fetch the ranking of the row under the cursor, bypassing the cache.
    pub fn refresh_selected_ranking(&self) -> Option<NetworkRequest> {
        let game_id = self.state.dashboard.selected_game_id()?;
        Some(self.state.dashboard.refresh_ranking(&game_id))
    }

    pub fn handle_sort(&mut self, field: SortField) {
        self.state.dashboard.handle_sort(field);
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }
}
