use crate::app::App;
use crate::state::app_state::SortField;
use crate::state::messages::NetworkRequest;
use crate::state::network::LoadingState;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    loading: LoadingState,
) {
    let mut guard = app.lock().await;

    // Search input mode captures printable keys before global bindings.
    if guard.state.dashboard.composing {
        match (key_event.code, key_event.modifiers) {
            (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            (KeyCode::Esc, _) => {
                guard.state.dashboard.clear_search();
                guard.state.dashboard.composing = false;
            }
            (KeyCode::Enter, _) => guard.state.dashboard.composing = false,
            (KeyCode::Backspace, _) => guard.state.dashboard.pop_search_char(),
            (Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                guard.state.dashboard.push_search_char(c)
            }
            _ => {}
        }
        return;
    }

    let mut request: Option<NetworkRequest> = None;

    match (key_event.code, key_event.modifiers) {
        // Quit
        (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Search
        (Char('/'), _) => guard.state.dashboard.composing = true,
        (KeyCode::Esc, _) => guard.state.dashboard.clear_search(),

        // Table navigation
        (Char('j') | KeyCode::Down, _) => guard.state.dashboard.select_next(),
        (Char('k') | KeyCode::Up, _) => guard.state.dashboard.select_prev(),

        // Expand / collapse the selected row (cache-checked detail fetch)
        (KeyCode::Enter, _) => request = guard.toggle_selected_details(),

        // Full list refresh — ignored while a list fetch is already running
        (Char('r'), _) => {
            if !loading.is_loading {
                request = Some(NetworkRequest::LoadGames);
            }
        }

        // Ranking refresh for the selected row, always bypasses the cache
        (Char('R'), _) => request = guard.refresh_selected_ranking(),

        // Column sorting
        (Char('1'), _) => guard.handle_sort(SortField::GameId),
        (Char('2'), _) => guard.handle_sort(SortField::TotalKills),
        (Char('3'), _) => guard.handle_sort(SortField::PlayerCount),
        (Char('4'), _) => guard.handle_sort(SortField::WorldKills),

        // Global
        (Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    if let Some(request) = request {
        drop(guard);
        let _ = network_requests.send(request).await;
    }
}
