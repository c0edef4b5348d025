//! Ranking request DTOs

use serde::Deserialize;

/// Create ranking entry request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRankingRequest {
    pub name: String,
    pub grade_and_class: String,
    /// Any JSON number; integrality is checked by the ranking service
    pub score: f64,
}

/// List ranking query parameters
///
/// Numeric parameters are kept as text and parsed by the ranking service,
/// so a malformed number reports the same message as an out-of-range one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingQuery {
    pub position_start: Option<String>,
    pub position_end: Option<String>,
    /// Case-insensitive name substring
    pub name: Option<String>,
    pub grade_and_class: Option<String>,
    pub score: Option<String>,
    /// Alias of `score`
    pub points: Option<String>,
}
