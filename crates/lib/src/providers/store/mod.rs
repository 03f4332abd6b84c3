pub mod memory;

use crate::errors::StoreError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde_json::{Map, Value};
use std::fmt::Debug;

/// A trait for interacting with a hosted JSON tree database.
///
/// Paths are slash-separated (`"packages/-Nx3..."`). Reads return the whole
/// subtree at the path; there is no query, filter, or pagination interface.
#[async_trait]
pub trait DocumentStore: Send + Sync + DynClone + Debug {
    /// Returns the name of the backend (e.g., "memory", "realtime-database").
    fn name(&self) -> &str;

    /// Reads the value at `path`, or `None` if nothing was ever written there.
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError>;

    /// Overwrites the value at `path`.
    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError>;

    /// Merges `fields` into the object at `path`.
    ///
    /// Keys absent from `fields` keep their values; a `null` value removes the key.
    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), StoreError>;

    /// Removes the value at `path`. Removing a missing path is not an error.
    async fn remove(&self, path: &str) -> Result<(), StoreError>;
}

dyn_clone::clone_trait_object!(DocumentStore);

/// Splits a path into its non-empty segments.
pub(crate) fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Characters a key may not contain in the hosted database.
pub const FORBIDDEN_KEY_CHARS: [char; 6] = ['.', '$', '#', '[', ']', '/'];

/// Checks that `key` is a push-id style key: ASCII letters, digits, `-` and `_`.
///
/// Record ids arrive from request paths, so anything that could be read as a
/// separator, query, or escape sequence by the hosted database is refused.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if !valid {
        return Err(StoreError::InvalidPath(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_id_alphabet_is_accepted() {
        assert!(validate_key("-Nx3aZ_09").is_ok());
        assert!(validate_key("dubai-luxury-1").is_ok());
    }

    #[test]
    fn query_and_escape_characters_are_rejected() {
        for key in ["", "abc?x=1", "%2F", "a.b", "a/b", "a b", "caf\u{e9}", "a#b"] {
            assert!(
                matches!(validate_key(key), Err(StoreError::InvalidPath(_))),
                "{key:?} should be rejected"
            );
        }
    }
}
