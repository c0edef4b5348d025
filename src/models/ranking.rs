//! Ranking model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Ranking database model
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub id: Uuid,
    pub position: i64,
    pub name: String,
    pub grade_and_class: String,
    pub score: i64,
}

/// The `(position, score)` pair the rank computation reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct RankSlot {
    pub position: i64,
    pub score: i64,
}

impl From<&RankingEntry> for RankSlot {
    fn from(entry: &RankingEntry) -> Self {
        Self {
            position: entry.position,
            score: entry.score,
        }
    }
}

/// A validated entry that has not been placed yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRankingEntry {
    pub name: String,
    /// Normalized: grade digit followed by an upper-case class letter
    pub grade_and_class: String,
    pub score: i64,
}

impl NewRankingEntry {
    /// Materialize the entry at `position`
    pub fn place(&self, id: Uuid, position: i64) -> RankingEntry {
        RankingEntry {
            id,
            position,
            name: self.name.clone(),
            grade_and_class: self.grade_and_class.clone(),
            score: self.score,
        }
    }
}

/// Where an inserted entry landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacedEntry {
    pub id: Uuid,
    pub position: i64,
}

/// Resolved, validated listing filter
///
/// The position bounds are inclusive; an absent end leaves the range open.
/// The remaining fields are conjunctive and skipped when `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingFilter {
    pub position_start: i64,
    pub position_end: Option<i64>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Normalized grade-and-class code
    pub grade_and_class: Option<String>,
    pub score: Option<i64>,
}

impl RankingFilter {
    /// Whether `entry` passes every filter
    pub fn matches(&self, entry: &RankingEntry) -> bool {
        entry.position >= self.position_start
            && self.position_end.is_none_or(|end| entry.position <= end)
            && self.name.as_deref().is_none_or(|needle| {
                entry.name.to_lowercase().contains(&needle.to_lowercase())
            })
            && self
                .grade_and_class
                .as_deref()
                .is_none_or(|code| entry.grade_and_class == code)
            && self.score.is_none_or(|score| entry.score == score)
    }
}

/// Filtered entries together with the size of the ranking they were read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingListing {
    /// Number of entries in the ranking, filtered or not
    pub total: i64,
    /// Matching entries, ordered by position
    pub entries: Vec<RankingEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(position: i64, name: &str, grade_and_class: &str, score: i64) -> RankingEntry {
        RankingEntry {
            id: Uuid::new_v4(),
            position,
            name: name.to_string(),
            grade_and_class: grade_and_class.to_string(),
            score,
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(entry(1, "Alice", "1A", 50)).unwrap();
        assert_eq!(value["gradeAndClass"], "1A");
        assert_eq!(value["position"], 1);
        assert!(value.get("grade_and_class").is_none());
    }

    #[test]
    fn test_filter_matches_name_case_insensitively() {
        let filter = RankingFilter {
            position_start: 1,
            position_end: Some(10),
            name: Some("LIC".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&entry(1, "Alice", "1A", 50)));
        assert!(!filter.matches(&entry(2, "Bob", "1A", 40)));
    }

    #[test]
    fn test_filter_bounds_are_inclusive() {
        let filter = RankingFilter {
            position_start: 2,
            position_end: Some(3),
            ..Default::default()
        };
        assert!(!filter.matches(&entry(1, "A", "1A", 9)));
        assert!(filter.matches(&entry(2, "B", "1A", 8)));
        assert!(filter.matches(&entry(3, "C", "1A", 7)));
        assert!(!filter.matches(&entry(4, "D", "1A", 6)));
    }

    #[test]
    fn test_filter_without_end_is_open() {
        let filter = RankingFilter {
            position_start: 2,
            ..Default::default()
        };
        assert!(!filter.matches(&entry(1, "A", "1A", 9)));
        assert!(filter.matches(&entry(i64::MAX, "Z", "1A", 0)));
    }

    #[test]
    fn test_filter_conjunction() {
        let filter = RankingFilter {
            position_start: 1,
            position_end: Some(10),
            grade_and_class: Some("2B".to_string()),
            score: Some(80),
            ..Default::default()
        };
        assert!(filter.matches(&entry(1, "Bob", "2B", 80)));
        assert!(!filter.matches(&entry(2, "Bea", "2B", 70)));
        assert!(!filter.matches(&entry(3, "Cal", "1B", 80)));
    }
}
