pub mod client;
pub mod wire;

use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the backend wire format
// ---------------------------------------------------------------------------

/// A single deathmatch record as served by the list endpoint.
///
/// The list endpoint returns summary records; the per-game detail endpoint
/// returns the same shape fully populated. `merge_detail` folds a detail
/// response onto a summary without replacing the record wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub id: String,
    pub total_kills: u32,
    /// Player id → display name.
    pub players: HashMap<String, String>,
    /// Player id → score. Signed: world kills subtract from the victim.
    pub kills: HashMap<String, i64>,
    /// Kill-method label (e.g. "MOD_RAILGUN") → occurrence count.
    pub kills_by_means: HashMap<String, u32>,
    pub world_kills: u32,
    /// Server-ordered ranking, best first. Never re-sorted locally.
    pub ranking: Vec<RankingEntry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingEntry {
    pub name: String,
    pub score: i64,
}

impl Game {
    /// Synthetic sort key: number of players seen in the match.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Case-insensitive substring match over the game id and every player
    /// display name. An empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.id.to_lowercase().contains(&needle)
            || self
                .players
                .values()
                .any(|name| name.to_lowercase().contains(&needle))
    }

    /// Merge a detail fetch onto this record. Field-by-field copy so a
    /// concurrently refreshed ranking is only clobbered when the detail
    /// actually carries one.
    pub fn merge_detail(&mut self, detail: &Game) {
        self.total_kills = detail.total_kills;
        self.world_kills = detail.world_kills;
        self.players = detail.players.clone();
        self.kills = detail.kills.clone();
        self.kills_by_means = detail.kills_by_means.clone();
        if !detail.ranking.is_empty() {
            self.ranking = detail.ranking.clone();
        }
    }

    /// Partial update touching only the ranking field.
    pub fn set_ranking(&mut self, ranking: Vec<RankingEntry>) {
        self.ranking = ranking;
    }
}
