//! Ranking repository (Postgres)

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    db::store::{RankingStore, RankingTransaction},
    error::AppResult,
    models::{NewRankingEntry, RankSlot, RankingEntry, RankingFilter, RankingListing},
};

/// Repository for ranking database operations
#[derive(Clone)]
pub struct RankingRepository {
    pool: PgPool,
}

impl RankingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RankingStore for RankingRepository {
    async fn begin_exclusive(&self) -> AppResult<Box<dyn RankingTransaction>> {
        let mut tx = self.pool.begin().await?;

        // EXCLUSIVE blocks other writers (and other EXCLUSIVE holders) but
        // not plain SELECTs, so leaderboard reads keep flowing
        sqlx::query("LOCK TABLE ranking IN EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        Ok(Box::new(PgRankingTransaction { tx }))
    }

    async fn find_by_position(&self, position: i64) -> AppResult<Option<RankingEntry>> {
        let entry = sqlx::query_as::<_, RankingEntry>(
            r#"
            SELECT id, position, name, grade_and_class, score
            FROM ranking
            WHERE position = $1
            "#,
        )
        .bind(position)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<RankingEntry>> {
        let entry = sqlx::query_as::<_, RankingEntry>(
            r#"
            SELECT id, position, name, grade_and_class, score
            FROM ranking
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM ranking"#)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn list(&self, filter: &RankingFilter) -> AppResult<RankingListing> {
        // Names only contain letters, digits and spaces, so no LIKE escaping
        let name_pattern = filter.name.as_ref().map(|name| format!("%{}%", name));

        // Both statements must read the same snapshot
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM ranking"#)
            .fetch_one(&mut *tx)
            .await?;

        let entries = sqlx::query_as::<_, RankingEntry>(
            r#"
            SELECT id, position, name, grade_and_class, score
            FROM ranking
            WHERE
                position >= $1
                AND ($2::bigint IS NULL OR position <= $2)
                AND ($3::text IS NULL OR name ILIKE $3)
                AND ($4::text IS NULL OR grade_and_class = $4)
                AND ($5::bigint IS NULL OR score = $5)
            ORDER BY position ASC
            "#,
        )
        .bind(filter.position_start)
        .bind(filter.position_end)
        .bind(&name_pattern)
        .bind(filter.grade_and_class.as_deref())
        .bind(filter.score)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(RankingListing { total, entries })
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Ranking transaction holding the table lock
struct PgRankingTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl RankingTransaction for PgRankingTransaction {
    async fn list_positions_and_scores(&mut self) -> AppResult<Vec<RankSlot>> {
        let slots = sqlx::query_as::<_, RankSlot>(
            r#"SELECT position, score FROM ranking ORDER BY position ASC"#,
        )
        .fetch_all(&mut *self.tx)
        .await?;

        Ok(slots)
    }

    async fn shift_positions_from(&mut self, from: i64) -> AppResult<u64> {
        let result = sqlx::query(r#"UPDATE ranking SET position = position + 1 WHERE position >= $1"#)
            .bind(from)
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }

    async fn create_entry(&mut self, position: i64, entry: &NewRankingEntry) -> AppResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO ranking (position, name, grade_and_class, score)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(position)
        .bind(&entry.name)
        .bind(&entry.grade_and_class)
        .bind(entry.score)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(id)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        // Deferred position uniqueness is checked here
        self.tx.commit().await?;
        Ok(())
    }
}
