use crate::state::messages::NetworkRequest;
use frag_api::{Game, RankingEntry};
use std::collections::{HashMap, HashSet};

// ---------------------------------------------------------------------------
// Sort specification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    GameId,
    TotalKills,
    PlayerCount,
    WorldKills,
}

impl SortField {
    pub fn label(&self) -> &'static str {
        match self {
            SortField::GameId => "Game",
            SortField::TotalKills => "Kills",
            SortField::PlayerCount => "Players",
            SortField::WorldKills => "World",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Ascending,
    Descending,
}

impl SortDir {
    pub fn toggle(self) -> Self {
        match self {
            SortDir::Ascending => SortDir::Descending,
            SortDir::Descending => SortDir::Ascending,
        }
    }

    pub fn indicator(self) -> char {
        match self {
            SortDir::Ascending => '▲',
            SortDir::Descending => '▼',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub dir: SortDir,
}

// ---------------------------------------------------------------------------
// Aggregate stats — pure reduction over the current list, never cached
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub games: usize,
    pub total_kills: u64,
    pub distinct_players: usize,
    pub world_kills: u64,
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Session state for the single dashboard view: the game list, the
/// detail cache, search/sort, and per-row fetch bookkeeping.
///
/// The cache is cleared wholesale on every successful list load and
/// updated incrementally by per-id detail fetches. At most one row is
/// expanded at a time, and only after its detail fetch succeeded.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub games: Vec<Game>,
    detail_cache: HashMap<String, Game>,
    pub loading_details: HashSet<String>,
    pub expanded: Option<String>,
    pub search: String,
    pub composing: bool,
    pub sort: Option<SortSpec>,
    pub selected: usize,
}

impl DashboardState {
    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    /// The filtered, sorted row list. Recomputed on every call from the
    /// latest list, search term and sort spec. The sort is stable so
    /// equal keys keep their server order.
    pub fn visible_games(&self) -> Vec<&Game> {
        let mut rows: Vec<&Game> = self
            .games
            .iter()
            .filter(|g| g.matches_search(&self.search))
            .collect();

        if let Some(spec) = self.sort {
            rows.sort_by(|a, b| {
                let ord = match spec.field {
                    SortField::GameId => a.id.cmp(&b.id),
                    SortField::TotalKills => a.total_kills.cmp(&b.total_kills),
                    SortField::PlayerCount => a.player_count().cmp(&b.player_count()),
                    SortField::WorldKills => a.world_kills.cmp(&b.world_kills),
                };
                match spec.dir {
                    SortDir::Ascending => ord,
                    SortDir::Descending => ord.reverse(),
                }
            });
        }

        rows
    }

    pub fn stats(&self) -> DashboardStats {
        let mut names: HashSet<&str> = HashSet::new();
        for game in &self.games {
            names.extend(game.players.values().map(String::as_str));
        }
        DashboardStats {
            games: self.games.len(),
            total_kills: self.games.iter().map(|g| u64::from(g.total_kills)).sum(),
            distinct_players: names.len(),
            world_kills: self.games.iter().map(|g| u64::from(g.world_kills)).sum(),
        }
    }

    /// Id of the game under the table cursor, in visible order.
    pub fn selected_game_id(&self) -> Option<String> {
        self.visible_games().get(self.selected).map(|g| g.id.clone())
    }

    pub fn is_detail_loading(&self, game_id: &str) -> bool {
        self.loading_details.contains(game_id)
    }

    // -----------------------------------------------------------------------
    // User actions
    // -----------------------------------------------------------------------

    /// Same field toggles direction; a new field starts ascending.
    pub fn handle_sort(&mut self, field: SortField) {
        self.sort = Some(match self.sort {
            Some(spec) if spec.field == field => SortSpec { field, dir: spec.dir.toggle() },
            _ => SortSpec { field, dir: SortDir::Ascending },
        });
    }

    /// Expand or collapse one row. Cached details expand immediately;
    /// uncached ones are marked in-flight and the returned request must
    /// be sent to the network worker. The row only becomes expanded once
    /// `on_game_detail_loaded` runs. Concurrent expands for the same
    /// uncached id issue duplicate requests, matching the backend-facing
    /// contract (no per-id coalescing).
    ///
    /// A cache hit only sets the expanded id. The list entry was already
    /// merged when the detail first loaded, and re-merging here would
    /// revert a ranking that a later ranking refresh replaced.
    pub fn toggle_game_details(&mut self, game_id: &str) -> Option<NetworkRequest> {
        if self.expanded.as_deref() == Some(game_id) {
            self.expanded = None;
            return None;
        }

        if self.detail_cache.contains_key(game_id) {
            self.expanded = Some(game_id.to_owned());
            return None;
        }

        self.loading_details.insert(game_id.to_owned());
        Some(NetworkRequest::LoadGameDetail { game_id: game_id.to_owned() })
    }

    /// Ranking refresh always hits the network; the cache is not consulted
    /// and not updated.
    pub fn refresh_ranking(&self, game_id: &str) -> NetworkRequest {
        NetworkRequest::LoadGameRanking { game_id: game_id.to_owned() }
    }

    pub fn select_next(&mut self) {
        let max = self.visible_games().len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.selected = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.selected = 0;
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.selected = 0;
    }

    // -----------------------------------------------------------------------
    // Network response handlers
    // -----------------------------------------------------------------------

    /// A fresh list replaces everything and invalidates the whole cache.
    pub fn on_games_loaded(&mut self, games: Vec<Game>) {
        self.games = games;
        self.detail_cache.clear();
        let max = self.visible_games().len().saturating_sub(1);
        self.selected = self.selected.min(max);
    }

    pub fn on_game_detail_loaded(&mut self, game_id: &str, detail: &Game) {
        self.loading_details.remove(game_id);
        self.detail_cache.insert(game_id.to_owned(), detail.clone());
        self.merge_into_list(game_id, detail);
        self.expanded = Some(game_id.to_owned());
    }

    pub fn on_game_detail_failed(&mut self, game_id: &str) {
        self.loading_details.remove(game_id);
    }

    pub fn on_ranking_loaded(&mut self, game_id: &str, ranking: Vec<RankingEntry>) {
        if let Some(game) = self.games.iter_mut().find(|g| g.id == game_id) {
            game.set_ranking(ranking);
        }
    }

    fn merge_into_list(&mut self, game_id: &str, detail: &Game) {
        if let Some(game) = self.games.iter_mut().find(|g| g.id == game_id) {
            game.merge_detail(detail);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: &str, players: &[(&str, &str)], total_kills: u32, world_kills: u32) -> Game {
        Game {
            id: id.to_owned(),
            total_kills,
            world_kills,
            players: players
                .iter()
                .map(|(pid, name)| (pid.to_string(), name.to_string()))
                .collect(),
            ..Game::default()
        }
    }

    fn two_game_state() -> DashboardState {
        let mut state = DashboardState::default();
        state.on_games_loaded(vec![
            game("A", &[("1", "Isgalamido"), ("2", "Zeh")], 10, 2),
            game("B", &[("1", "Assasinu Credi")], 3, 1),
        ]);
        state
    }

    fn ids(rows: &[&Game]) -> Vec<String> {
        rows.iter().map(|g| g.id.clone()).collect()
    }

    #[test]
    fn empty_search_shows_the_full_list() {
        let state = two_game_state();
        assert_eq!(ids(&state.visible_games()), vec!["A", "B"]);
    }

    #[test]
    fn search_filters_by_id_or_player_name() {
        let mut state = two_game_state();
        state.push_search_char('b');
        assert_eq!(ids(&state.visible_games()), vec!["B"]);

        state.clear_search();
        for c in "zeh".chars() {
            state.push_search_char(c);
        }
        assert_eq!(ids(&state.visible_games()), vec!["A"]);
    }

    #[test]
    fn sort_by_total_kills_descending_puts_a_first() {
        let mut state = two_game_state();
        state.handle_sort(SortField::TotalKills);
        assert_eq!(ids(&state.visible_games()), vec!["B", "A"]);
        state.handle_sort(SortField::TotalKills);
        assert_eq!(ids(&state.visible_games()), vec!["A", "B"]);
    }

    #[test]
    fn repeated_sort_toggles_direction_new_field_resets_to_ascending() {
        let mut state = two_game_state();
        state.handle_sort(SortField::GameId);
        assert_eq!(
            state.sort,
            Some(SortSpec { field: SortField::GameId, dir: SortDir::Ascending })
        );
        state.handle_sort(SortField::GameId);
        assert_eq!(
            state.sort,
            Some(SortSpec { field: SortField::GameId, dir: SortDir::Descending })
        );
        state.handle_sort(SortField::WorldKills);
        assert_eq!(
            state.sort,
            Some(SortSpec { field: SortField::WorldKills, dir: SortDir::Ascending })
        );
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut state = DashboardState::default();
        state.on_games_loaded(vec![
            game("C", &[("1", "Zeh")], 5, 0),
            game("A", &[("1", "Zeh")], 5, 0),
            game("B", &[("1", "Zeh")], 5, 0),
        ]);
        state.handle_sort(SortField::TotalKills);
        assert_eq!(ids(&state.visible_games()), vec!["C", "A", "B"]);
        state.handle_sort(SortField::TotalKills);
        assert_eq!(ids(&state.visible_games()), vec!["C", "A", "B"]);
    }

    #[test]
    fn sort_by_player_count_uses_map_size() {
        let mut state = two_game_state();
        state.handle_sort(SortField::PlayerCount);
        assert_eq!(ids(&state.visible_games()), vec!["B", "A"]);
    }

    #[test]
    fn first_expand_issues_exactly_one_fetch_second_is_served_from_cache() {
        let mut state = two_game_state();

        let request = state.toggle_game_details("A");
        assert!(matches!(
            request,
            Some(NetworkRequest::LoadGameDetail { ref game_id }) if game_id == "A"
        ));
        assert!(state.is_detail_loading("A"));
        assert_eq!(state.expanded, None, "expand waits for the fetch to succeed");

        let detail = game("A", &[("1", "Isgalamido"), ("2", "Zeh"), ("3", "Dono")], 12, 2);
        state.on_game_detail_loaded("A", &detail);
        assert!(!state.is_detail_loading("A"));
        assert_eq!(state.expanded.as_deref(), Some("A"));
        assert_eq!(state.games[0].player_count(), 3, "detail merged onto summary");

        // Collapse, then expand again: no further request.
        assert!(state.toggle_game_details("A").is_none());
        assert_eq!(state.expanded, None);
        assert!(state.toggle_game_details("A").is_none());
        assert_eq!(state.expanded.as_deref(), Some("A"));
    }

    #[test]
    fn cached_expand_keeps_a_ranking_refreshed_after_the_detail_fetch() {
        let mut state = two_game_state();

        state.toggle_game_details("A");
        let mut detail = game("A", &[("1", "Isgalamido"), ("2", "Zeh")], 12, 2);
        detail.ranking = vec![RankingEntry { name: "Isgalamido".into(), score: 5 }];
        state.on_game_detail_loaded("A", &detail);

        // Ranking refresh lands after the detail was cached.
        state.on_ranking_loaded("A", vec![RankingEntry { name: "Zeh".into(), score: 9 }]);

        // Collapse, then re-expand from cache: the refreshed ranking stays.
        state.toggle_game_details("A");
        assert!(state.toggle_game_details("A").is_none());
        assert_eq!(state.expanded.as_deref(), Some("A"));
        assert_eq!(state.games[0].ranking.len(), 1);
        assert_eq!(state.games[0].ranking[0].name, "Zeh");
        assert_eq!(state.games[0].ranking[0].score, 9);
    }

    #[test]
    fn list_refresh_clears_the_cache() {
        let mut state = two_game_state();
        state.toggle_game_details("A");
        state.on_game_detail_loaded("A", &game("A", &[("1", "Zeh")], 12, 2));
        assert!(state.detail_cache.contains_key("A"));

        state.on_games_loaded(vec![game("A", &[("1", "Zeh")], 12, 2)]);
        assert!(!state.detail_cache.contains_key("A"));

        state.expanded = None;
        let request = state.toggle_game_details("A");
        assert!(request.is_some(), "post-refresh expand must re-fetch");
    }

    #[test]
    fn detail_failure_leaves_state_untouched_and_clears_loading() {
        let mut state = two_game_state();
        let before = state.games.clone();

        state.toggle_game_details("A");
        state.on_game_detail_failed("A");

        assert_eq!(state.games, before);
        assert_eq!(state.expanded, None);
        assert!(!state.is_detail_loading("A"));
        assert!(!state.detail_cache.contains_key("A"));
    }

    #[test]
    fn stats_are_recomputed_from_the_latest_list() {
        let mut state = two_game_state();
        assert_eq!(state.stats().total_kills, 13);
        state.on_ranking_loaded("A", vec![]);
        state.games[0].total_kills = 20;
        assert_eq!(state.stats().total_kills, 23);
    }

    #[test]
    fn ranking_refresh_updates_only_that_games_ranking() {
        let mut state = two_game_state();
        let other_before = state.games[1].clone();

        state.on_ranking_loaded(
            "A",
            vec![RankingEntry { name: "Zeh".into(), score: 7 }],
        );

        assert_eq!(state.games[0].ranking.len(), 1);
        assert_eq!(state.games[0].total_kills, 10, "other fields untouched");
        assert_eq!(state.games[1], other_before);
        assert!(!state.detail_cache.contains_key("A"), "ranking refresh bypasses the cache");
    }

    #[test]
    fn ranking_refresh_request_ignores_cache_and_expansion() {
        let mut state = two_game_state();
        state.toggle_game_details("A");
        state.on_game_detail_loaded("A", &game("A", &[("1", "Zeh")], 12, 2));

        let request = state.refresh_ranking("A");
        assert!(matches!(
            request,
            NetworkRequest::LoadGameRanking { ref game_id } if game_id == "A"
        ));
    }

    #[test]
    fn concurrent_uncached_expands_issue_duplicate_requests() {
        let mut state = two_game_state();
        let first = state.toggle_game_details("A");
        let second = state.toggle_game_details("A");
        assert!(first.is_some());
        assert!(second.is_some(), "no per-id request coalescing");
    }

    #[test]
    fn stats_aggregate_across_the_list() {
        let state = two_game_state();
        let stats = state.stats();
        assert_eq!(stats.games, 2);
        assert_eq!(stats.total_kills, 13);
        assert_eq!(stats.distinct_players, 3);
        assert_eq!(stats.world_kills, 3);
    }

    #[test]
    fn stats_count_distinct_player_names_across_games() {
        let mut state = DashboardState::default();
        state.on_games_loaded(vec![
            game("A", &[("1", "Zeh"), ("2", "Dono")], 1, 0),
            game("B", &[("9", "Zeh")], 1, 0),
        ]);
        assert_eq!(state.stats().distinct_players, 2);
    }

    #[test]
    fn selection_follows_the_visible_order_and_clamps() {
        let mut state = two_game_state();
        state.handle_sort(SortField::TotalKills);
        state.handle_sort(SortField::TotalKills); // descending: [A, B]
        state.select_next();
        assert_eq!(state.selected_game_id().as_deref(), Some("B"));
        state.select_next();
        assert_eq!(state.selected_game_id().as_deref(), Some("B"));

        state.push_search_char('b');
        state.on_games_loaded(vec![game("B", &[("1", "Assasinu Credi")], 3, 1)]);
        assert_eq!(state.selected, 0);
    }
}
