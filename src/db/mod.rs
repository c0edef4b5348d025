//! Database module
//!
//! This module handles database connections, migrations, the store
//! abstraction and its Postgres and in-memory implementations.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod store;

use sqlx::PgPool;

pub use connection::*;
pub use memory::MemoryRankingStore;
pub use repositories::RankingRepository;
pub use store::{RankingStore, RankingTransaction};

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
