//! App-id catalog file: dedupe + CSV read/write.
//!
//! The CSV (`app_id,name`) is the hand-off between the two gather modes.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::GatherError;
use crate::steam::AppListEntry;

pub const DEFAULT_CSV_PATH: &str = "all_steam_game_ids.csv";

/// One catalog row. `app_id` stays textual so malformed rows can be
/// skipped by the reader instead of failing the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub app_id: String,
    #[serde(default)]
    pub name: String,
}

impl CatalogRow {
    /// Parse the id, or `None` when it is not a plain decimal number.
    #[must_use]
    pub fn numeric_id(&self) -> Option<u32> {
        if self.app_id.is_empty() || !self.app_id.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.app_id.parse().ok()
    }
}

/// Collapse duplicate app ids: first-seen order, last-seen name.
#[must_use]
pub fn dedupe(apps: Vec<AppListEntry>) -> Vec<AppListEntry> {
    let mut index: HashMap<u32, usize> = HashMap::with_capacity(apps.len());
    let mut unique: Vec<AppListEntry> = Vec::with_capacity(apps.len());
    for app in apps {
        match index.get(&app.appid) {
            Some(&slot) => unique[slot] = app,
            None => {
                index.insert(app.appid, unique.len());
                unique.push(app);
            }
        }
    }
    unique
}

/// Write the catalog with an `app_id,name` header.
///
/// # Errors
///
/// Returns an error if a row cannot be written.
pub fn write_csv<W: Write>(writer: W, apps: &[AppListEntry]) -> Result<(), GatherError> {
    let mut out = csv::Writer::from_writer(writer);
    for app in apps {
        out.serialize(CatalogRow { app_id: app.appid.to_string(), name: app.name.clone() })?;
    }
    if apps.is_empty() {
        out.write_record(["app_id", "name"])?;
    }
    out.flush()?;
    Ok(())
}

/// Read every catalog row.
///
/// Short rows get an empty name. Rows that still fail to decode are logged
/// and dropped.
///
/// # Errors
///
/// Returns an error if the header cannot be read.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<CatalogRow>, GatherError> {
    let mut input = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    input.headers()?;

    let mut rows = Vec::new();
    for result in input.deserialize::<CatalogRow>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                let line = e.position().map(csv::Position::line);
                warn!(?line, error = %e, "skipping unreadable catalog row");
            }
        }
    }
    Ok(rows)
}

/// Write the catalog to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_csv_file(path: &Path, apps: &[AppListEntry]) -> Result<(), GatherError> {
    write_csv(File::create(path)?, apps)
}

/// Read the catalog from `path`.
///
/// # Errors
///
/// Returns [`GatherError::Io`] with `NotFound` when the file is missing.
pub fn read_csv_file(path: &Path) -> Result<Vec<CatalogRow>, GatherError> {
    read_csv(File::open(path)?)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
