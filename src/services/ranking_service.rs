//! Ranking service
//!
//! Maintains the leaderboard: every entry holds a distinct position in
//! `1..=N`, positions ascend as scores descend, and among equal scores the
//! earlier insertion ranks higher. Inserting re-numbers the tail of the
//! table inside one exclusive store transaction.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    constants::{messages, ranking},
    db::RankingStore,
    error::{AppError, AppResult},
    handlers::ranking::request::RankingQuery,
    models::{NewRankingEntry, PlacedEntry, RankSlot, RankingEntry, RankingFilter},
    utils::validation::{
        normalize_grade_and_class, parse_range_bound, parse_score_filter, validate_name,
        validate_position, validate_score,
    },
};

/// Ranking service for business logic
#[derive(Clone)]
pub struct RankingService {
    store: Arc<dyn RankingStore>,
}

impl RankingService {
    pub fn new(store: Arc<dyn RankingStore>) -> Self {
        Self { store }
    }

    /// Insert a contestant and re-number everyone ranked below them
    pub async fn insert(
        &self,
        name: &str,
        grade_and_class: &str,
        score: f64,
    ) -> AppResult<PlacedEntry> {
        let entry = Self::validate_new_entry(name, grade_and_class, score)?;

        let mut attempt = 1;
        loop {
            match self.place(&entry).await {
                Err(err) if err.is_transient() && attempt < ranking::INSERT_ATTEMPTS => {
                    warn!(attempt, name = %entry.name, "Ranking insert collided with another writer, retrying");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// Get the entry at a position
    pub async fn get_by_position(&self, position: i64) -> AppResult<RankingEntry> {
        let position = validate_position(position).map_err(AppError::validation)?;

        self.store
            .find_by_position(position)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::RANKING_NOT_FOUND.to_string()))
    }

    /// Get an entry by its id
    pub async fn get_by_id(&self, id: &str) -> AppResult<RankingEntry> {
        let id = Uuid::parse_str(id.trim()).map_err(|_| AppError::validation(messages::INVALID_ID))?;

        self.store
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::RANKING_NOT_FOUND.to_string()))
    }

    /// List entries matching the query, ordered by position
    pub async fn get_range(&self, query: &RankingQuery) -> AppResult<Vec<RankingEntry>> {
        let start = query
            .position_start
            .as_deref()
            .map(parse_range_bound)
            .transpose()
            .map_err(AppError::validation)?;
        let end = query
            .position_end
            .as_deref()
            .map(parse_range_bound)
            .transpose()
            .map_err(AppError::validation)?;
        if matches!((start, end), (Some(start), Some(end)) if start > end) {
            return Err(AppError::validation(messages::INVALID_RANGE));
        }

        let name = match query.name.as_deref() {
            Some(name) => {
                validate_name(name).map_err(AppError::validation)?;
                Some(name.to_string())
            }
            None => None,
        };
        let grade_and_class = query
            .grade_and_class
            .as_deref()
            .map(normalize_grade_and_class)
            .transpose()
            .map_err(AppError::validation)?;
        let score = Self::resolve_score_filter(query.score.as_deref(), query.points.as_deref())?;

        // An omitted end stays open; the default end is the total of the
        // snapshot the entries came from
        let filter = RankingFilter {
            position_start: start.unwrap_or(1),
            position_end: end,
            name,
            grade_and_class,
            score,
        };
        let listing = self.store.list(&filter).await?;

        if listing.total == 0 {
            return Ok(Vec::new());
        }
        if end.is_none() && filter.position_start > listing.total {
            return Err(AppError::validation(messages::INVALID_RANGE));
        }

        debug!(?filter, total = listing.total, returned = listing.entries.len(), "Ranking range listed");
        Ok(listing.entries)
    }

    /// Check that the backing store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }

    fn validate_new_entry(name: &str, grade_and_class: &str, score: f64) -> AppResult<NewRankingEntry> {
        validate_name(name).map_err(AppError::validation)?;
        let grade_and_class = normalize_grade_and_class(grade_and_class).map_err(AppError::validation)?;
        let score = validate_score(score).map_err(AppError::validation)?;

        Ok(NewRankingEntry {
            name: name.to_string(),
            grade_and_class,
            score,
        })
    }

    /// `score` and `points` name the same filter
    fn resolve_score_filter(score: Option<&str>, points: Option<&str>) -> AppResult<Option<i64>> {
        let score = score
            .map(parse_score_filter)
            .transpose()
            .map_err(AppError::validation)?;
        let points = points
            .map(parse_score_filter)
            .transpose()
            .map_err(AppError::validation)?;

        match (score, points) {
            (Some(score), Some(points)) if score != points => {
                Err(AppError::validation(messages::INVALID_SCORE))
            }
            (score, points) => Ok(score.or(points)),
        }
    }

    /// One read-rank, shift, write pass under the store's write lock
    async fn place(&self, entry: &NewRankingEntry) -> AppResult<PlacedEntry> {
        let mut tx = self.store.begin_exclusive().await?;

        let slots = tx.list_positions_and_scores().await?;
        let position = insertion_rank(&slots, entry.score);

        let shifted = if position <= slots.len() as i64 {
            tx.shift_positions_from(position).await?
        } else {
            0
        };
        let id = tx.create_entry(position, entry).await?;
        tx.commit().await?;

        info!(%id, position, shifted, score = entry.score, "Ranking entry inserted");
        Ok(PlacedEntry { id, position })
    }
}

/// Position a new `score` takes in `slots` (ordered by position)
///
/// That is the position of the first entry scoring strictly less; entries
/// with an equal score stay ahead. With no such entry the new one goes last.
pub fn insertion_rank(slots: &[RankSlot], score: i64) -> i64 {
    slots
        .iter()
        .find(|slot| slot.score < score)
        .map(|slot| slot.position)
        .unwrap_or(slots.len() as i64 + 1)
}
