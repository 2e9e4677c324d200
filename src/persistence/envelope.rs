//! Versioned save envelope
//!
//! Every record is stored as `{ "version": N, "data": ... }` so a format change
//! can be detected instead of silently misread.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{KeyValueStore, PersistError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub version: u32,
    pub data: T,
}

/// Serialize `data` under `key` tagged with `version`
pub fn save_versioned<T, S>(
    store: &mut S,
    key: &str,
    version: u32,
    data: &T,
) -> Result<(), PersistError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(&Envelope { version, data })?;
    store.set(key, &json)
}

/// Read the record under `key`. `Ok(None)` if it was never saved.
pub fn load_versioned<T, S>(store: &S, key: &str, version: u32) -> Result<Option<T>, PersistError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(&json)?;
    if envelope.version != version {
        return Err(PersistError::VersionMismatch {
            found: envelope.version,
            expected: version,
        });
    }
    Ok(Some(serde_json::from_value(envelope.data)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_missing_key() {
        let store = MemoryStore::default();
        let loaded: Option<Vec<u32>> = load_versioned(&store, "nope", 1).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_wraps_data() {
        let mut store = MemoryStore::default();
        save_versioned(&mut store, "k", 3, &vec![1u32, 2]).unwrap();
        assert_eq!(
            store.get("k").unwrap().as_deref(),
            Some(r#"{"version":3,"data":[1,2]}"#)
        );
        let loaded: Option<Vec<u32>> = load_versioned(&store, "k", 3).unwrap();
        assert_eq!(loaded, Some(vec![1, 2]));
    }

    #[test]
    fn test_version_mismatch() {
        let mut store = MemoryStore::default();
        save_versioned(&mut store, "k", 1, &5u32).unwrap();
        let result: Result<Option<u32>, _> = load_versioned(&store, "k", 2);
        assert!(matches!(
            result,
            Err(PersistError::VersionMismatch {
                found: 1,
                expected: 2
            })
        ));
    }

    #[test]
    fn test_corrupt_record() {
        let mut store = MemoryStore::default();
        store.set("k", "{ truncated").unwrap();
        let result: Result<Option<u32>, _> = load_versioned(&store, "k", 1);
        assert!(matches!(result, Err(PersistError::Json(_))));
    }
}
