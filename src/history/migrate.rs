use super::storage::{history_key, list_key};
use super::types::EvaluationRecord;
use crate::store::{read_json, write_json, KeyValueStore, Stored};
use anyhow::Result;
use serde_json::Value;

/// Shared history written before histories were kept per facility
pub const LEGACY_HISTORY_KEY: &str = "history:default-shared";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationReport {
    /// Number of records moved out of the legacy store
    pub migrated: usize,
    /// Destination keys, in first-seen order
    pub keys: Vec<String>,
    /// Records that could not be read and stay under the legacy key
    pub kept: usize,
}

/// Move records from the legacy shared history into per-facility histories.
///
/// Records are grouped by their own `facility` field. Within each facility
/// they keep their legacy (newest-first) order and go after anything already
/// stored there. Each record is read on its own: unreadable ones stay under
/// the legacy key, and a legacy value that is not a JSON list is left
/// untouched. Once every record has moved the legacy key is removed, so
/// running this again does nothing new.
pub fn migrate_legacy<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<MigrationReport> {
    let values = match read_json::<Vec<Value>, _>(&*store, LEGACY_HISTORY_KEY)? {
        Stored::Missing => return Ok(MigrationReport::default()),
        Stored::Malformed(reason) => {
            tracing::warn!(%reason, "legacy history is unreadable, leaving it in place");
            return Ok(MigrationReport::default());
        }
        Stored::Value(values) => values,
    };

    let mut records = Vec::with_capacity(values.len());
    let mut rejected = Vec::new();
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<EvaluationRecord>(value.clone()) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(index, reason = %e, "skipping unreadable legacy record");
                rejected.push(value);
            }
        }
    }

    let mut buckets: Vec<(String, Vec<EvaluationRecord>)> = Vec::new();
    for record in records {
        let key = history_key(&record.facility);
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, bucket)) => bucket.push(record),
            None => buckets.push((key, vec![record])),
        }
    }

    let mut report = MigrationReport::default();
    for (key, moved) in buckets {
        let mut records = list_key(&*store, &key)?;
        report.migrated += moved.len();
        records.extend(moved);
        write_json(store, &key, &records)?;
        report.keys.push(key);
    }

    if rejected.is_empty() {
        store.delete(LEGACY_HISTORY_KEY)?;
    } else {
        report.kept = rejected.len();
        write_json(store, LEGACY_HISTORY_KEY, &rejected)?;
        tracing::warn!(kept = report.kept, "unreadable legacy records left in place");
    }
    tracing::debug!(
        migrated = report.migrated,
        facilities = report.keys.len(),
        "legacy history migrated"
    );

    Ok(report)
}
