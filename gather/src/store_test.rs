use super::*;
use std::collections::HashSet;

use serde_json::json;

struct MockSource {
    missing: HashSet<u32>,
    unsuccessful: HashSet<u32>,
}

impl MockSource {
    fn all_present() -> Self {
        Self { missing: HashSet::new(), unsuccessful: HashSet::new() }
    }
}

#[async_trait::async_trait]
impl DetailsSource for MockSource {
    async fn details(&self, app_id: u32) -> Option<Value> {
        if self.missing.contains(&app_id) {
            return None;
        }
        let success = !self.unsuccessful.contains(&app_id);
        let mut body = serde_json::Map::new();
        body.insert(app_id.to_string(), json!({ "success": success, "data": { "name": format!("App {app_id}") } }));
        Some(Value::Object(body))
    }
}

#[derive(Default)]
struct MockSink {
    staged: Vec<u32>,
    committed: Vec<Vec<u32>>,
    reject: HashSet<u32>,
}

#[async_trait::async_trait]
impl RecordSink for MockSink {
    async fn store(&mut self, record: &StoreRecord) -> Result<(), GatherError> {
        if self.reject.contains(&record.app_id) {
            return Err(GatherError::Io(std::io::Error::other("rejected")));
        }
        self.staged.push(record.app_id);
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), GatherError> {
        self.committed.push(std::mem::take(&mut self.staged));
        Ok(())
    }
}

fn rows(ids: &[&str]) -> Vec<CatalogRow> {
    ids.iter().map(|id| CatalogRow { app_id: (*id).to_owned(), name: String::new() }).collect()
}

fn options(batch_size: usize) -> StoreOptions {
    StoreOptions { batch_size, batch_pause: Duration::ZERO, progress_every: 2 }
}

#[tokio::test]
async fn commits_full_batches_and_remainder() {
    let mut sink = MockSink::default();
    let summary = store_app_details(&rows(&["1", "2", "3", "4", "5"]), &MockSource::all_present(), &mut sink, options(2))
        .await
        .unwrap();

    assert_eq!(sink.committed, vec![vec![1, 2], vec![3, 4], vec![5]]);
    assert_eq!(summary, StoreSummary { rows: 5, stored: 5, skipped: 0, commits: 3, progress_reports: 2 });
}

#[tokio::test]
async fn exact_multiple_of_batch_size_has_no_trailing_commit() {
    let mut sink = MockSink::default();
    let summary = store_app_details(&rows(&["1", "2", "3", "4"]), &MockSource::all_present(), &mut sink, options(2))
        .await
        .unwrap();

    assert_eq!(sink.committed.len(), 2);
    assert_eq!(summary.commits, 2);
}

#[tokio::test]
async fn skips_non_numeric_missing_unsuccessful_and_rejected_apps() {
    let source = MockSource { missing: HashSet::from([2]), unsuccessful: HashSet::from([3]) };
    let mut sink = MockSink { reject: HashSet::from([4]), ..MockSink::default() };

    let summary = store_app_details(&rows(&["1", "abc", "2", "3", "4", "5"]), &source, &mut sink, options(1000))
        .await
        .unwrap();

    assert_eq!(sink.committed, vec![vec![1, 5]]);
    assert_eq!(summary, StoreSummary { rows: 6, stored: 2, skipped: 4, commits: 1, progress_reports: 0 });
}

#[tokio::test]
async fn skipped_rows_do_not_count_toward_batch() {
    let source = MockSource { missing: HashSet::from([2]), unsuccessful: HashSet::new() };
    let mut sink = MockSink::default();

    store_app_details(&rows(&["1", "2", "3"]), &source, &mut sink, options(2)).await.unwrap();

    assert_eq!(sink.committed, vec![vec![1, 3]]);
}

#[tokio::test]
async fn progress_is_reported_only_for_stored_rows() {
    let source = MockSource { missing: HashSet::from([2]), unsuccessful: HashSet::new() };
    let mut sink = MockSink::default();

    // Positions 2 and 4 hit `progress_every`; position 2 is skipped.
    let summary = store_app_details(&rows(&["1", "2", "3", "4"]), &source, &mut sink, options(1000))
        .await
        .unwrap();

    assert_eq!(summary.stored, 3);
    assert_eq!(summary.progress_reports, 1);
}

#[tokio::test]
async fn empty_catalog_never_commits() {
    let mut sink = MockSink::default();
    let summary = store_app_details(&[], &MockSource::all_present(), &mut sink, options(2)).await.unwrap();

    assert!(sink.committed.is_empty());
    assert_eq!(summary, StoreSummary::default());
}

#[test]
fn default_options_match_storefront_pacing() {
    let opts = StoreOptions::default();
    assert_eq!(opts.batch_size, 1000);
    assert_eq!(opts.batch_pause, Duration::from_millis(1500));
    assert_eq!(opts.progress_every, 100);
}
