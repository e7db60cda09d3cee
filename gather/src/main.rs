//! Steam catalog gatherer.
//!
//! `--type all-ids` walks the store app list and writes the id catalog CSV.
//! `--type store-details` reads that CSV, fetches storefront details for
//! each app and upserts them into Postgres.

mod catalog;
mod db;
mod details;
mod error;
mod steam;
mod store;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use crate::error::GatherError;
use crate::steam::SteamClient;
use crate::store::StoreOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Fetch every store app id and write the catalog CSV.
    AllIds,
    /// Fetch details for every catalog id and store them.
    StoreDetails,
}

#[derive(Parser, Debug)]
#[command(name = "gather", about = "Gather Steam Store data")]
struct Cli {
    /// Type of data to gather/store.
    #[arg(long = "type", value_enum)]
    mode: Mode,

    /// Steam Web API key. Falls back to the contents of `--key-file`.
    #[arg(long, env = "STEAM_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "STEAM_API_KEY_FILE", default_value = "environment.txt")]
    key_file: PathBuf,

    #[arg(long, env = "GATHER_CSV", default_value = catalog::DEFAULT_CSV_PATH)]
    csv: PathBuf,

    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    #[arg(long, env = "STEAM_API_BASE_URL", default_value = steam::DEFAULT_API_BASE_URL)]
    api_base_url: String,

    #[arg(long, env = "STEAM_STORE_BASE_URL", default_value = steam::DEFAULT_STORE_BASE_URL)]
    store_base_url: String,

    /// Stored apps per committed batch.
    #[arg(long, default_value_t = 1000)]
    batch_size: usize,

    /// Pause after each committed batch, in milliseconds.
    #[arg(long, default_value_t = 1500)]
    batch_pause_ms: u64,

    #[arg(long, default_value_t = 100)]
    progress_every: usize,

    #[arg(long, default_value_t = 10)]
    request_timeout_secs: u64,
}

impl Cli {
    fn store_options(&self) -> StoreOptions {
        StoreOptions {
            batch_size: self.batch_size,
            batch_pause: Duration::from_millis(self.batch_pause_ms),
            progress_every: self.progress_every,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), GatherError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "gather=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let client = SteamClient::new(&cli.api_base_url, &cli.store_base_url, Duration::from_secs(cli.request_timeout_secs))?;

    match cli.mode {
        Mode::AllIds => run_all_ids(&cli, &client).await,
        Mode::StoreDetails => run_store_details(&cli, &client).await,
    }
}

async fn run_all_ids(cli: &Cli, client: &SteamClient) -> Result<(), GatherError> {
    let api_key = resolve_api_key(cli.api_key.clone(), &cli.key_file);
    let apps = client.fetch_all_ids(&api_key).await?;
    let unique = catalog::dedupe(apps);
    catalog::write_csv_file(&cli.csv, &unique)?;
    info!(path = %cli.csv.display(), unique = unique.len(), "saved app id catalog");
    Ok(())
}

async fn run_store_details(cli: &Cli, client: &SteamClient) -> Result<(), GatherError> {
    let rows = match catalog::read_csv_file(&cli.csv) {
        Ok(rows) => rows,
        Err(GatherError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %cli.csv.display(), "catalog file not found; run with --type all-ids first");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let database_url = cli.database_url.as_deref().ok_or(GatherError::MissingDatabaseUrl)?;
    let pool = db::init_pool(database_url).await?;
    let mut sink = db::PgSink::new(pool);

    let summary = store::store_app_details(&rows, client, &mut sink, cli.store_options()).await?;
    info!(
        rows = summary.rows,
        stored = summary.stored,
        skipped = summary.skipped,
        commits = summary.commits,
        "finished storing app details"
    );
    Ok(())
}

/// Pick the API key: explicit value first, then the trimmed key file.
/// A missing key file is not fatal; the app list is requested without a key.
fn resolve_api_key(explicit: Option<String>, key_file: &Path) -> String {
    if let Some(key) = explicit.map(|k| k.trim().to_owned()).filter(|k| !k.is_empty()) {
        return key;
    }
    match std::fs::read_to_string(key_file) {
        Ok(contents) => contents.trim().to_owned(),
        Err(e) => {
            warn!(path = %key_file.display(), error = %e, "API key file not readable");
            String::new()
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
