pub mod prompt;

pub use prompt::{prompt_for_passphrase, read_passphrase};

use crate::store::{read_json, write_json, KeyValueStore, Stored};
use crate::text::{initials, normalize};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store key holding the authenticated session
pub const SESSION_KEY: &str = "session";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessSession {
    pub facility: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    EmptyPassphrase,
    WrongPassphrase,
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::EmptyPassphrase => {
                write!(f, "Enter the access key (the facility's initials)")
            }
            AccessError::WrongPassphrase => {
                write!(f, "Wrong access key (use the facility's initials)")
            }
        }
    }
}

impl std::error::Error for AccessError {}

/// Check a passphrase against the facility's initials
pub fn verify_passphrase(facility: &str, passphrase: &str) -> Result<(), AccessError> {
    let passphrase = passphrase.trim();
    if passphrase.is_empty() {
        return Err(AccessError::EmptyPassphrase);
    }
    if normalize(passphrase).to_uppercase() != initials(facility) {
        return Err(AccessError::WrongPassphrase);
    }
    Ok(())
}

/// Verify the passphrase and persist a session for `facility`
///
/// A rejected passphrase surfaces as an [`AccessError`] inside the returned error.
pub fn authenticate<S: KeyValueStore + ?Sized>(
    store: &mut S,
    facility: &str,
    passphrase: &str,
    now: DateTime<Utc>,
) -> Result<AccessSession> {
    if let Err(e) = verify_passphrase(facility, passphrase) {
        tracing::debug!(facility, error = %e, "access denied");
        return Err(e.into());
    }

    let session = AccessSession {
        facility: facility.to_string(),
        timestamp: now,
    };
    write_json(store, SESSION_KEY, &session)?;
    tracing::debug!(facility, "session opened");

    Ok(session)
}

/// The persisted session, if any. Unreadable or facility-less sessions count as absent.
pub fn current_session<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<AccessSession>> {
    match read_json::<AccessSession, _>(store, SESSION_KEY)? {
        Stored::Value(session) if !session.facility.trim().is_empty() => Ok(Some(session)),
        Stored::Value(_) => Ok(None),
        Stored::Missing => Ok(None),
        Stored::Malformed(reason) => {
            tracing::warn!(%reason, "ignoring unreadable session");
            Ok(None)
        }
    }
}

/// Drop the persisted session. Safe to call when nobody is logged in.
pub fn logout<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<()> {
    store.delete(SESSION_KEY)
}

/// Login hint: "Clínica Alemana → CA"
pub fn hint(facility: &str) -> String {
    if facility.is_empty() {
        return String::new();
    }
    format!("{} → {}", facility, initials(facility))
}

/// Find a configured facility by 1-based index, exact name,
/// or name ignoring accents and case
pub fn resolve_facility<'a>(input: &str, facilities: &'a [String]) -> Option<&'a str> {
    let input = input.trim();

    if let Ok(index) = input.parse::<usize>() {
        if index >= 1 {
            if let Some(f) = facilities.get(index - 1) {
                return Some(f.as_str());
            }
        }
    }

    if let Some(f) = facilities.iter().find(|f| f.as_str() == input) {
        return Some(f.as_str());
    }

    let wanted = normalize(input).to_lowercase();
    facilities
        .iter()
        .find(|f| normalize(f).to_lowercase() == wanted)
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::defaults::FACILITIES;
    use crate::store::MemoryStore;

    fn login(store: &mut MemoryStore, facility: &str, key: &str) -> Result<AccessSession, AccessError> {
        authenticate(store, facility, key, Utc::now()).map_err(|e| {
            e.downcast::<AccessError>()
                .expect("only passphrase errors expected from a memory store")
        })
    }

    #[test]
    fn test_initials_authenticate_every_facility() {
        for facility in FACILITIES {
            let mut store = MemoryStore::new();
            let session = login(&mut store, facility, &initials(facility)).unwrap();
            assert_eq!(session.facility, *facility);
        }
    }

    #[test]
    fn test_empty_passphrase() {
        let mut store = MemoryStore::new();
        assert_eq!(login(&mut store, "Clínica Alemana", ""), Err(AccessError::EmptyPassphrase));
        assert_eq!(login(&mut store, "Clínica Alemana", "   "), Err(AccessError::EmptyPassphrase));
        assert!(current_session(&store).unwrap().is_none());
    }

    #[test]
    fn test_wrong_passphrase() {
        for facility in FACILITIES {
            let mut store = MemoryStore::new();
            let key = format!("{}X", initials(facility));
            assert_eq!(login(&mut store, facility, &key), Err(AccessError::WrongPassphrase));
            assert!(current_session(&store).unwrap().is_none());
        }
    }

    #[test]
    fn test_passphrase_is_trimmed_and_case_insensitive() {
        let mut store = MemoryStore::new();
        assert!(login(&mut store, "Clínica Alemana", "  ca ").is_ok());
    }

    #[test]
    fn test_session_persisted_and_logout() {
        let mut store = MemoryStore::new();
        let session = login(&mut store, "Hospital del Salvador", "HS").unwrap();

        let loaded = current_session(&store).unwrap().unwrap();
        assert_eq!(loaded, session);

        logout(&mut store).unwrap();
        assert!(current_session(&store).unwrap().is_none());
        // Idempotent
        logout(&mut store).unwrap();
    }

    #[test]
    fn test_session_with_empty_facility_is_absent() {
        let mut store = MemoryStore::new();
        store
            .set(SESSION_KEY, r#"{"facility":"","timestamp":"2026-01-01T00:00:00Z"}"#)
            .unwrap();
        assert!(current_session(&store).unwrap().is_none());
    }

    #[test]
    fn test_malformed_session_is_absent() {
        let mut store = MemoryStore::new();
        store.set(SESSION_KEY, "garbage").unwrap();
        assert!(current_session(&store).unwrap().is_none());
    }

    #[test]
    fn test_hint() {
        assert_eq!(hint("Clínica Alemana"), "Clínica Alemana → CA");
        assert_eq!(hint(""), "");
    }

    #[test]
    fn test_resolve_facility() {
        let facilities: Vec<String> = FACILITIES.iter().map(|f| f.to_string()).collect();
        assert_eq!(resolve_facility("1", &facilities), Some("Clínica Alemana"));
        assert_eq!(resolve_facility("Clínica Dávila", &facilities), Some("Clínica Dávila"));
        assert_eq!(resolve_facility("clinica davila", &facilities), Some("Clínica Dávila"));
        assert_eq!(resolve_facility("0", &facilities), None);
        assert_eq!(resolve_facility("Nowhere", &facilities), None);
    }
}
