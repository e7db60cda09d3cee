//! `store-details` mode: fetch details for every catalog row and persist.
//!
//! DESIGN
//! ======
//! Rows are processed one at a time. Stored records accumulate in an open
//! batch which is committed every `batch_size` apps, followed by a pause to
//! stay under the storefront rate limit. Per-app failures (fetch, decode,
//! database) are logged and skipped; the run only aborts when a batch
//! commit fails.

use std::time::Duration;

use serde_json::Value;
use tracing::{info, warn};

use crate::catalog::CatalogRow;
use crate::details::StoreRecord;
use crate::error::GatherError;

/// Where app details come from.
#[async_trait::async_trait]
pub trait DetailsSource: Send + Sync {
    async fn details(&self, app_id: u32) -> Option<Value>;
}

/// Where normalized records go.
#[async_trait::async_trait]
pub trait RecordSink: Send {
    /// Stage one record in the open batch.
    async fn store(&mut self, record: &StoreRecord) -> Result<(), GatherError>;

    /// Make the open batch durable.
    async fn commit(&mut self) -> Result<(), GatherError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub batch_size: usize,
    pub batch_pause: Duration,
    pub progress_every: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { batch_size: 1000, batch_pause: Duration::from_millis(1500), progress_every: 100 }
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreSummary {
    pub rows: usize,
    pub stored: usize,
    pub skipped: usize,
    pub commits: usize,
    /// Progress lines logged; one per stored row at a `progress_every` position.
    pub progress_reports: usize,
}

/// Fetch, normalize and persist details for every numeric row.
///
/// # Errors
///
/// Returns an error if committing a batch fails.
pub async fn store_app_details<S, K>(
    rows: &[CatalogRow],
    source: &S,
    sink: &mut K,
    options: StoreOptions,
) -> Result<StoreSummary, GatherError>
where
    S: DetailsSource + ?Sized,
    K: RecordSink + ?Sized,
{
    let batch_size = options.batch_size.max(1);
    let progress_every = options.progress_every.max(1);
    let mut summary = StoreSummary { rows: rows.len(), ..StoreSummary::default() };
    let mut pending = 0usize;

    for (i, row) in rows.iter().enumerate() {
        let position = i + 1;
        let stored = match row.numeric_id() {
            Some(app_id) => store_one(app_id, source, sink).await,
            None => false,
        };
        if !stored {
            summary.skipped += 1;
            continue;
        }
        summary.stored += 1;
        pending += 1;

        if pending == batch_size {
            sink.commit().await?;
            summary.commits += 1;
            pending = 0;
            tokio::time::sleep(options.batch_pause).await;
        }

        // Skipped rows never report, even at a multiple of `progress_every`.
        if position % progress_every == 0 {
            summary.progress_reports += 1;
            info!(processed = position, stored = summary.stored, "processing app details");
        }
    }

    if pending > 0 {
        sink.commit().await?;
        summary.commits += 1;
    }

    Ok(summary)
}

async fn store_one<S, K>(app_id: u32, source: &S, sink: &mut K) -> bool
where
    S: DetailsSource + ?Sized,
    K: RecordSink + ?Sized,
{
    let Some(body) = source.details(app_id).await else {
        return false;
    };
    let Some(record) = StoreRecord::from_response(app_id, &body) else {
        return false;
    };
    match sink.store(&record).await {
        Ok(()) => true,
        Err(e) => {
            warn!(app_id, error = %e, "failed to store app details");
            false
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
