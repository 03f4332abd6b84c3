//! # Entity Repositories
//!
//! `EntityRepository<E>` is the typed create/list/update/delete surface for one
//! entity kind, layered over any [`DocumentStore`]. All validation happens
//! before these calls; the repository itself never rejects a record.

use crate::{
    entities::{sort_newest_first, Deletable, Draft, Entity},
    errors::StoreError,
    ids::PushIdGenerator,
    providers::store::{validate_key, DocumentStore},
};
use serde::Serialize;
use serde_json::Value;
use std::{marker::PhantomData, sync::Arc};
use tracing::{debug, error, info, warn};

pub struct EntityRepository<E: Entity> {
    store: Box<dyn DocumentStore>,
    ids: Arc<PushIdGenerator>,
    _kind: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for EntityRepository<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            ids: Arc::clone(&self.ids),
            _kind: PhantomData,
        }
    }
}

impl<E: Entity> std::fmt::Debug for EntityRepository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRepository")
            .field("collection", &E::COLLECTION)
            .field("store", &self.store.name())
            .finish()
    }
}

impl<E: Entity> EntityRepository<E> {
    pub fn new(store: Box<dyn DocumentStore>, ids: Arc<PushIdGenerator>) -> Self {
        Self {
            store,
            ids,
            _kind: PhantomData,
        }
    }

    fn record_path(id: &str) -> Result<String, StoreError> {
        validate_key(id)?;
        Ok(format!("{}/{id}", E::COLLECTION))
    }

    /// Creates a record from `draft` and returns its fresh identifier.
    pub async fn add(&self, mut draft: E::Draft) -> Result<String, StoreError> {
        draft.normalize();
        let (id, now) = self.ids.next_stamped();
        let record = E::from_draft(id.clone(), now, draft);
        let value = serde_json::to_value(&record)?;

        self.store
            .set(&Self::record_path(&id)?, value)
            .await
            .inspect_err(|e| error!("Error adding {}: {e}", E::LABEL))?;
        info!(collection = E::COLLECTION, %id, "Added {}", E::LABEL);
        Ok(id)
    }

    /// Returns every record in the collection in store order.
    ///
    /// A collection that was never written to yields an empty list. Nodes that
    /// do not decode as a record are skipped with a warning.
    pub async fn list(&self) -> Result<Vec<E>, StoreError> {
        let snapshot = self
            .store
            .get(E::COLLECTION)
            .await
            .inspect_err(|e| error!("Error getting {} list: {e}", E::LABEL))?;

        let records: Vec<E> = match snapshot {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Object(map)) => map
                .into_iter()
                .filter_map(|(key, value)| decode_record(&key, value))
                .collect(),
            // Sequential numeric keys come back as an array.
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .filter(|(_, v)| !v.is_null())
                .filter_map(|(index, value)| decode_record(&index.to_string(), value))
                .collect(),
            Some(other) => {
                return Err(StoreError::Unavailable(format!(
                    "collection '{}' holds a {} instead of records",
                    E::COLLECTION,
                    json_kind(&other)
                )))
            }
        };
        debug!(collection = E::COLLECTION, count = records.len(), "Listed records");
        Ok(records)
    }

    /// Returns every record sorted by creation time, newest first.
    pub async fn list_newest_first(&self) -> Result<Vec<E>, StoreError> {
        let mut records = self.list().await?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    pub async fn get(&self, id: &str) -> Result<Option<E>, StoreError> {
        match self.store.get(&Self::record_path(id)?).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Merges the fields of `partial` into the record. Fields `partial` does not
    /// carry keep their stored values.
    pub async fn update<P: Serialize + ?Sized>(&self, id: &str, partial: &P) -> Result<(), StoreError> {
        let path = Self::record_path(id)?;
        let fields = match serde_json::to_value(partial)? {
            Value::Object(map) => map,
            _ => return Err(StoreError::InvalidPatch(path)),
        };
        self.store
            .update(&path, fields)
            .await
            .inspect_err(|e| error!("Error updating {}: {e}", E::LABEL))?;
        info!(collection = E::COLLECTION, %id, "Updated {}", E::LABEL);
        Ok(())
    }

    /// Overwrites the editable fields of the record with `draft`. Optional
    /// fields the draft leaves unset are removed from the record; the id,
    /// creation time, and status are kept.
    pub async fn replace_fields(&self, id: &str, draft: &E::Draft) -> Result<(), StoreError> {
        let mut fields = match serde_json::to_value(draft)? {
            Value::Object(map) => map,
            _ => return Err(StoreError::InvalidPatch(Self::record_path(id)?)),
        };
        for key in <E::Draft as Draft>::OPTIONAL_FIELDS {
            fields.entry(*key).or_insert(Value::Null);
        }
        self.update(id, &fields).await
    }
}

impl<E: Deletable> EntityRepository<E> {
    /// Removes the record. Deleting an id that does not exist succeeds.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store
            .remove(&Self::record_path(id)?)
            .await
            .inspect_err(|e| error!("Error deleting {}: {e}", E::LABEL))?;
        info!(collection = E::COLLECTION, %id, "Deleted {}", E::LABEL);
        Ok(())
    }
}

fn decode_record<E: Entity>(key: &str, value: Value) -> Option<E> {
    serde_json::from_value(value)
        .inspect_err(|e| {
            warn!(collection = E::COLLECTION, %key, "Skipping undecodable {}: {e}", E::LABEL)
        })
        .ok()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One repository per entity kind, sharing a store and an id generator.
#[derive(Clone, Debug)]
pub struct Repositories {
    pub bookings: EntityRepository<crate::entities::Booking>,
    pub packages: EntityRepository<crate::entities::Package>,
    pub offers: EntityRepository<crate::entities::Offer>,
    pub umrah_applications: EntityRepository<crate::entities::UmrahApplication>,
    pub travel_moments: EntityRepository<crate::entities::TravelMoment>,
}

impl Repositories {
    pub fn new(store: Box<dyn DocumentStore>) -> Self {
        let ids = Arc::new(PushIdGenerator::new());
        Self {
            bookings: EntityRepository::new(store.clone(), Arc::clone(&ids)),
            packages: EntityRepository::new(store.clone(), Arc::clone(&ids)),
            offers: EntityRepository::new(store.clone(), Arc::clone(&ids)),
            umrah_applications: EntityRepository::new(store.clone(), Arc::clone(&ids)),
            travel_moments: EntityRepository::new(store, ids),
        }
    }
}
