use super::types::EvaluationRecord;
use super::HistoryError;
use crate::store::{read_json, write_json, KeyValueStore, Stored};
use crate::text::slug;
use anyhow::Result;

/// Per-facility key: "history:<facility-slug>"
pub fn history_key(facility: &str) -> String {
    let name = if facility.trim().is_empty() {
        "default"
    } else {
        facility
    };
    format!("history:{}", slug(name))
}

pub(crate) fn load_key<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<Stored<Vec<EvaluationRecord>>> {
    read_json(store, key)
}

pub(crate) fn list_key<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<Vec<EvaluationRecord>> {
    match load_key(store, key)? {
        Stored::Value(records) => Ok(records),
        Stored::Missing => Ok(Vec::new()),
        Stored::Malformed(reason) => {
            tracing::warn!(key, %reason, "stored history is unreadable, treating it as empty");
            Ok(Vec::new())
        }
    }
}

/// Raw view of a facility's history, distinguishing missing from unreadable data
pub fn load<S: KeyValueStore + ?Sized>(
    store: &S,
    facility: &str,
) -> Result<Stored<Vec<EvaluationRecord>>> {
    load_key(store, &history_key(facility))
}

/// Records for `facility`, newest first. Unreadable data reads as empty.
pub fn list<S: KeyValueStore + ?Sized>(store: &S, facility: &str) -> Result<Vec<EvaluationRecord>> {
    list_key(store, &history_key(facility))
}

/// Prepend `record` to the facility's history
pub fn append<S: KeyValueStore + ?Sized>(
    store: &mut S,
    facility: &str,
    record: EvaluationRecord,
) -> Result<()> {
    let key = history_key(facility);
    let mut records = list_key(&*store, &key)?;
    records.insert(0, record);
    write_json(store, &key, &records)?;
    tracing::debug!(%key, count = records.len(), "appended evaluation");
    Ok(())
}

/// The most recent record for `facility`
pub fn latest<S: KeyValueStore + ?Sized>(store: &S, facility: &str) -> Result<EvaluationRecord> {
    list(store, facility)?
        .into_iter()
        .next()
        .ok_or_else(|| HistoryError::NoData.into())
}
