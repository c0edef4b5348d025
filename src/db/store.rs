//! Ranking store abstraction
//!
//! The ranking engine talks to persistence only through these traits.
//! Reads go straight to the store; every write happens inside a
//! [`RankingTransaction`] opened with [`RankingStore::begin_exclusive`],
//! which excludes other writers until it is committed or dropped.
//! Dropping a transaction without committing discards all of its writes.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{NewRankingEntry, RankSlot, RankingEntry, RankingFilter, RankingListing},
};

/// Read access and transaction factory for the ranking table
#[async_trait]
pub trait RankingStore: Send + Sync {
    /// Open a transaction that holds the ranking write lock
    async fn begin_exclusive(&self) -> AppResult<Box<dyn RankingTransaction>>;

    /// Entry currently at `position`
    async fn find_by_position(&self, position: i64) -> AppResult<Option<RankingEntry>>;

    /// Entry with the given id
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<RankingEntry>>;

    /// Number of entries
    async fn count(&self) -> AppResult<i64>;

    /// Entries passing `filter`, ordered by position ascending
    ///
    /// The entries and the total are read from one snapshot, so a concurrent
    /// insert is either fully visible in both or in neither.
    async fn list(&self, filter: &RankingFilter) -> AppResult<RankingListing>;

    /// Cheap liveness probe
    async fn ping(&self) -> AppResult<()>;
}

/// Writes against the ranking table, applied atomically on commit
#[async_trait]
pub trait RankingTransaction: Send {
    /// All `(position, score)` pairs, ordered by position ascending
    async fn list_positions_and_scores(&mut self) -> AppResult<Vec<RankSlot>>;

    /// Move every entry at `from` or below down one place
    ///
    /// Returns the number of entries moved.
    async fn shift_positions_from(&mut self, from: i64) -> AppResult<u64>;

    /// Write `entry` at `position` and return its new id
    async fn create_entry(&mut self, position: i64, entry: &NewRankingEntry) -> AppResult<Uuid>;

    /// Make every write visible at once
    async fn commit(self: Box<Self>) -> AppResult<()>;
}
