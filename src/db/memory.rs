//! In-memory ranking store
//!
//! Used when no `DATABASE_URL` is configured, and by the test suite.
//! Readers clone an immutable snapshot; a transaction works on a private
//! copy and swaps it in on commit, so a reader sees either the state before
//! an insert or the state after it.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::{
    constants::messages,
    error::{AppError, AppResult},
    models::{NewRankingEntry, RankSlot, RankingEntry, RankingFilter, RankingListing},
};

use super::store::{RankingStore, RankingTransaction};

type Snapshot = Arc<RwLock<Arc<Vec<RankingEntry>>>>;

/// Ranking store kept in process memory
#[derive(Clone, Default)]
pub struct MemoryRankingStore {
    /// Committed entries, sorted by position
    snapshot: Snapshot,
    /// Held by the open transaction, if any
    writer: Arc<Mutex<()>>,
}

impl MemoryRankingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Arc<Vec<RankingEntry>> {
        self.snapshot.read().clone()
    }
}

#[async_trait]
impl RankingStore for MemoryRankingStore {
    async fn begin_exclusive(&self) -> AppResult<Box<dyn RankingTransaction>> {
        let guard = self.writer.clone().lock_owned().await;
        let working = self.entries().as_ref().clone();

        Ok(Box::new(MemoryRankingTransaction {
            _guard: guard,
            snapshot: self.snapshot.clone(),
            working,
        }))
    }

    async fn find_by_position(&self, position: i64) -> AppResult<Option<RankingEntry>> {
        Ok(self
            .entries()
            .iter()
            .find(|entry| entry.position == position)
            .cloned())
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<RankingEntry>> {
        Ok(self.entries().iter().find(|entry| entry.id == *id).cloned())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.entries().len() as i64)
    }

    async fn list(&self, filter: &RankingFilter) -> AppResult<RankingListing> {
        let entries = self.entries();

        Ok(RankingListing {
            total: entries.len() as i64,
            entries: entries
                .iter()
                .filter(|entry| filter.matches(entry))
                .cloned()
                .collect(),
        })
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Open in-memory transaction
struct MemoryRankingTransaction {
    _guard: OwnedMutexGuard<()>,
    snapshot: Snapshot,
    working: Vec<RankingEntry>,
}

impl MemoryRankingTransaction {
    /// Mirrors the unique constraint on `position`
    fn ensure_free(&self, position: i64) -> AppResult<()> {
        let taken = self
            .working
            .binary_search_by_key(&position, |entry| entry.position)
            .is_ok();
        if taken {
            return Err(AppError::Conflict(messages::CONCURRENT_MODIFICATION.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RankingTransaction for MemoryRankingTransaction {
    async fn list_positions_and_scores(&mut self) -> AppResult<Vec<RankSlot>> {
        Ok(self.working.iter().map(RankSlot::from).collect())
    }

    async fn shift_positions_from(&mut self, from: i64) -> AppResult<u64> {
        // `working` is sorted by position, so the moved entries are a suffix
        // and adding one to each keeps them distinct and in order
        let first = self.working.partition_point(|entry| entry.position < from);
        for entry in &mut self.working[first..] {
            entry.position += 1;
        }
        Ok((self.working.len() - first) as u64)
    }

    async fn create_entry(&mut self, position: i64, entry: &NewRankingEntry) -> AppResult<Uuid> {
        self.ensure_free(position)?;

        let id = Uuid::new_v4();
        let index = self.working.partition_point(|existing| existing.position < position);
        self.working.insert(index, entry.place(id, position));
        Ok(id)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let Self {
            _guard,
            snapshot,
            working,
        } = *self;
        *snapshot.write() = Arc::new(working);
        Ok(())
    }
}
