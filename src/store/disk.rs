use super::KeyValueStore;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Get the platform data directory for nas-score (~/.local/share/nas-score on Linux)
pub fn get_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("nas-score"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.local/share/nas-score",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// File name for a store key: "history:clinica-alemana" -> "history.clinica-alemana.json"
///
/// ASCII letters, digits, '-' and '_' pass through, ':' becomes '.', and any
/// other byte is written as %XX, so distinct keys never share a file.
fn key_file_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 5);
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' => name.push(byte as char),
            b':' => name.push('.'),
            _ => name.push_str(&format!("%{:02X}", byte)),
        }
    }
    name.push_str(".json");
    name
}

/// Persistent store with one JSON file per key
///
/// Writes go through a temporary file that is renamed into place, so a value
/// is either the old one or the new one after a crash. Overwriting or
/// deleting a key frees the space of the previous value.
#[derive(Debug, Clone)]
pub struct DiskStore {
    path: PathBuf,
}

impl DiskStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_for(&self, key: &str) -> PathBuf {
        self.path.join(key_file_name(key))
    }
}

impl KeyValueStore for DiskStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let file = self.file_for(key);
        match fs::read(&file) {
            Ok(bytes) => {
                let value = String::from_utf8(bytes)
                    .with_context(|| format!("Stored value for '{}' is not UTF-8", key))?;
                tracing::debug!(key, "store read");
                Ok(Some(value))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to read '{}' from {}", key, file.display())
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.path).with_context(|| {
            format!("Failed to create store directory at {}", self.path.display())
        })?;

        let file = self.file_for(key);
        let mut out = AtomicWriteFile::open(&file)
            .with_context(|| format!("Failed to open atomic write file at {}", file.display()))?;
        out.write_all(value.as_bytes())
            .with_context(|| format!("Failed to write '{}' to {}", key, file.display()))?;
        out.commit()
            .with_context(|| format!("Failed to save '{}' to {}", key, file.display()))?;

        tracing::debug!(key, bytes = value.len(), "store write");
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let file = self.file_for(key);
        match fs::remove_file(&file) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to delete '{}' from {}", key, file.display())
                })
            }
        }
        tracing::debug!(key, "store delete");
        Ok(())
    }
}
