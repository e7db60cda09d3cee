//! Catalog database: pool setup, migrations, and the Postgres record sink.
//!
//! SYSTEM CONTEXT
//! ==============
//! `store-details` writes through [`PgSink`]. Each app is applied inside a
//! savepoint of the open batch transaction, so one bad app rolls back only
//! its own statements and the batch keeps going.

use sqlx::postgres::PgPoolOptions;
use sqlx::{Acquire, PgPool, Postgres, Transaction};

use crate::details::StoreRecord;
use crate::error::GatherError;
use crate::store::RecordSink;

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 2;

fn db_max_connections() -> u32 {
    std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
}

/// Initialize the `PostgreSQL` connection pool and run migrations.
///
/// # Errors
///
/// Returns an error if the connection or migrations fail.
pub async fn init_pool(database_url: &str) -> Result<PgPool, GatherError> {
    let pool = PgPoolOptions::new()
        .max_connections(db_max_connections())
        .connect(database_url)
        .await?;

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}

/// Batches records into one transaction per commit.
pub struct PgSink {
    pool: PgPool,
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgSink {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool, tx: None }
    }
}

#[async_trait::async_trait]
impl RecordSink for PgSink {
    async fn store(&mut self, record: &StoreRecord) -> Result<(), GatherError> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => self.pool.begin().await?,
        };
        let tx = self.tx.insert(tx);

        let mut savepoint = tx.begin().await?;
        write_record(&mut savepoint, record).await?;
        savepoint.commit().await?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), GatherError> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
        }
        Ok(())
    }
}

/// Upsert the details row, then replace the app's categories and genres.
async fn write_record(tx: &mut Transaction<'_, Postgres>, record: &StoreRecord) -> Result<(), sqlx::Error> {
    let app_id = i64::from(record.app_id);

    sqlx::query(
        r"INSERT INTO steam_app_details
              (app_id, name, coming_soon, release_date_date, is_free, recommendations, raw_json)
          VALUES ($1, $2, $3, $4, $5, $6, $7)
          ON CONFLICT (app_id) DO UPDATE SET
              name = EXCLUDED.name,
              coming_soon = EXCLUDED.coming_soon,
              release_date_date = EXCLUDED.release_date_date,
              is_free = EXCLUDED.is_free,
              recommendations = EXCLUDED.recommendations,
              raw_json = EXCLUDED.raw_json,
              fetched_at = now()",
    )
    .bind(app_id)
    .bind(&record.name)
    .bind(record.coming_soon)
    .bind(record.release_date)
    .bind(record.is_free)
    .bind(record.recommendations)
    .bind(&record.raw_json)
    .execute(&mut **tx)
    .await?;

    sqlx::query("DELETE FROM steam_app_categories WHERE app_id = $1")
        .bind(app_id)
        .execute(&mut **tx)
        .await?;
    sqlx::query("DELETE FROM steam_app_genres WHERE app_id = $1")
        .bind(app_id)
        .execute(&mut **tx)
        .await?;

    for category in &record.categories {
        sqlx::query("INSERT INTO steam_app_categories (app_id, category_name) VALUES ($1, $2)")
            .bind(app_id)
            .bind(category)
            .execute(&mut **tx)
            .await?;
    }
    for genre in &record.genres {
        sqlx::query("INSERT INTO steam_app_genres (app_id, genre_name) VALUES ($1, $2)")
            .bind(app_id)
            .bind(genre)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
