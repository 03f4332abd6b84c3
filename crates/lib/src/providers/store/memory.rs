//! # In-Memory Document Store
//!
//! A process-local `DocumentStore` with the same tree semantics as the hosted
//! realtime database: empty objects do not exist, `null` deletes, and updates
//! merge shallowly. Used when no database URL is configured and in tests.

use super::{segments, DocumentStore};
use crate::errors::StoreError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    root: Arc<RwLock<Map<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the whole tree, mainly for assertions.
    pub async fn snapshot(&self) -> Value {
        Value::Object(self.root.read().await.clone())
    }
}

fn lookup<'a>(root: &'a Map<String, Value>, segs: &[&str]) -> Option<&'a Value> {
    let (last, parents) = segs.split_last()?;
    let mut map = root;
    for seg in parents {
        map = map.get(*seg)?.as_object()?;
    }
    map.get(*last)
}

// Walks to the object at `segs`, creating (or replacing non-object) nodes on the way.
fn object_at<'a>(root: &'a mut Map<String, Value>, segs: &[&str]) -> &'a mut Map<String, Value> {
    let mut current = root;
    for seg in segs {
        let entry = current
            .entry(seg.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(next) = entry else {
            unreachable!("node was just replaced by an object");
        };
        current = next;
    }
    current
}

// Removes empty objects along `segs`, deepest first.
fn prune(map: &mut Map<String, Value>, segs: &[&str]) {
    let Some((first, rest)) = segs.split_first() else {
        return;
    };
    if let Some(Value::Object(child)) = map.get_mut(*first) {
        prune(child, rest);
        if child.is_empty() {
            map.remove(*first);
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let root = self.root.read().await;
        let segs = segments(path);
        let value = if segs.is_empty() {
            Some(Value::Object(root.clone()))
        } else {
            lookup(&root, &segs).cloned()
        };
        Ok(value.filter(|v| match v {
            Value::Null => false,
            Value::Object(m) => !m.is_empty(),
            _ => true,
        }))
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let mut root = self.root.write().await;
        let segs = segments(path);
        let Some((last, parents)) = segs.split_last() else {
            *root = match value {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            return Ok(());
        };
        debug!(path, "memory store set");
        if value.is_null() {
            if let Some(parent) = lookup_mut(&mut root, parents) {
                parent.remove(*last);
            }
        } else {
            object_at(&mut root, parents).insert(last.to_string(), value);
        }
        prune(&mut root, &segs);
        Ok(())
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), StoreError> {
        let mut root = self.root.write().await;
        let segs = segments(path);
        debug!(path, keys = fields.len(), "memory store update");
        let target = object_at(&mut root, &segs);
        for (key, value) in fields {
            if value.is_null() {
                target.remove(&key);
            } else {
                target.insert(key, value);
            }
        }
        prune(&mut root, &segs);
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        self.set(path, Value::Null).await
    }
}

fn lookup_mut<'a>(
    root: &'a mut Map<String, Value>,
    segs: &[&str],
) -> Option<&'a mut Map<String, Value>> {
    let mut map = root;
    for seg in segs {
        map = map.get_mut(*seg)?.as_object_mut()?;
    }
    Some(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn unwritten_path_reads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("packages").await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_merges_and_null_deletes() {
        let store = MemoryStore::new();
        store
            .set("bookings/b1", json!({"destination": "Dubai", "status": "pending", "note": "x"}))
            .await
            .unwrap();
        let mut fields = Map::new();
        fields.insert("status".into(), json!("confirmed"));
        fields.insert("note".into(), Value::Null);
        store.update("bookings/b1", fields).await.unwrap();

        assert_eq!(
            store.get("bookings/b1").await.unwrap(),
            Some(json!({"destination": "Dubai", "status": "confirmed"}))
        );
    }

    #[tokio::test]
    async fn removing_last_child_removes_collection() {
        let store = MemoryStore::new();
        store.set("offers/o1", json!({"title": "t"})).await.unwrap();
        store.remove("offers/o1").await.unwrap();
        store.remove("offers/o1").await.unwrap();
        assert_eq!(store.get("offers").await.unwrap(), None);
        assert_eq!(store.snapshot().await, json!({}));
    }
}
