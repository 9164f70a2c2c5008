//! Key-value persistence shared by the session gate and the history store.
//!
//! Every stateful operation receives a [`KeyValueStore`] explicitly. Values
//! are JSON text; [`read_json`] distinguishes a missing key from one whose
//! value no longer parses.

pub mod disk;
pub mod memory;

pub use disk::{get_store_path, DiskStore};
pub use memory::MemoryStore;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// String-keyed storage with get/set/delete semantics
pub trait KeyValueStore {
    /// Read the value stored under `key`, or None if nothing is stored
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&mut self, key: &str) -> Result<()>;
}

/// Outcome of reading a JSON value from the store
#[derive(Debug, Clone, PartialEq)]
pub enum Stored<T> {
    Missing,
    Malformed(String),
    Value(T),
}

impl<T> Stored<T> {
    /// The parsed value, if there was one
    pub fn value(self) -> Option<T> {
        match self {
            Stored::Value(v) => Some(v),
            Stored::Missing | Stored::Malformed(_) => None,
        }
    }
}

/// Read and parse the JSON value under `key`
///
/// Store failures are errors; unparseable data is reported as `Stored::Malformed`.
pub fn read_json<T, S>(store: &S, key: &str) -> Result<Stored<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(Stored::Missing);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Stored::Value(value)),
        Err(e) => Ok(Stored::Malformed(e.to_string())),
    }
}

/// Serialize `value` as JSON and store it under `key`
pub fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value)
        .with_context(|| format!("Failed to serialize value for key '{}'", key))?;
    store.set(key, &json)
}
