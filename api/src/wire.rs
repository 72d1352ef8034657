/// Backend wire types — serde shapes for deserializing the REST responses.
/// Every field is optional so a missing key degrades to an empty value
/// instead of failing the whole body; mapping to the clean domain types
/// happens in client.rs.
use serde::Deserialize;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Game list + game detail  (GET /api/games, GET /api/games/{id})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct GameRecord {
    pub id: Option<String>,
    pub total_kills: Option<u32>,
    pub players: Option<HashMap<String, String>>,
    pub kills: Option<HashMap<String, i64>>,
    pub kills_by_means: Option<HashMap<String, u32>>,
    pub world_kills: Option<u32>,
    pub ranking: Option<Vec<RankingRecord>>,
}

// ---------------------------------------------------------------------------
// Ranking  (GET /api/games/{id}/ranking)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RankingRecord {
    pub name: Option<String>,
    pub score: Option<i64>,
}
