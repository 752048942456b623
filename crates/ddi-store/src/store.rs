//! In-memory per-kind collections.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use ddi_model::{Entity, Kind};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

/// Read-only lookup of resources by kind and id or URN.
///
/// The resolver only ever reads through this trait, so any immutable source
/// (the fixture-backed [`DataStore`], a test double) can back it.
pub trait EntitySource {
    /// Find the `kind` resource named by `key` (an id, explicit URN or
    /// canonical URN). Resources tagged with a different `typeOfObject` than
    /// `kind` are not returned.
    fn lookup(&self, kind: Kind, key: &str) -> Option<&Entity>;
}

/// Flat per-kind collections, loaded once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    collections: BTreeMap<Kind, Vec<Entity>>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every collection from `root`, honouring an optional `ddi.toml`.
    pub fn load(root: &Path) -> Result<Self> {
        let config = StoreConfig::load(root)?;
        Self::load_with_config(root, &config)
    }

    pub fn load_with_config(root: &Path, config: &StoreConfig) -> Result<Self> {
        if !root.is_dir() {
            return Err(StoreError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }
        let mut store = Self::new();
        for kind in Kind::RESOURCES {
            let Some(file) = config.collection_file(kind) else {
                continue;
            };
            let path = root.join(file);
            if !path.is_file() {
                debug!(%kind, path = %path.display(), "no collection file, using empty collection");
                continue;
            }
            let entities = read_collection(&path)?;
            debug!(%kind, count = entities.len(), path = %path.display(), "loaded collection");
            store.insert_collection(kind, entities)?;
        }
        info!(
            root = %root.display(),
            entities = store.total_len(),
            "loaded data store"
        );
        Ok(store)
    }

    /// Builder-style variant of [`DataStore::insert_collection`].
    pub fn with_collection(mut self, kind: Kind, entities: Vec<Entity>) -> Result<Self> {
        self.insert_collection(kind, entities)?;
        Ok(self)
    }

    /// Replace the collection for `kind`. Ids must be unique within it.
    pub fn insert_collection(&mut self, kind: Kind, entities: Vec<Entity>) -> Result<()> {
        let mut seen = BTreeSet::new();
        for entity in &entities {
            if let Some(id) = entity.id() {
                if !seen.insert(id) {
                    return Err(StoreError::DuplicateId {
                        kind,
                        id: id.to_string(),
                    });
                }
            }
        }
        self.collections.insert(kind, entities);
        Ok(())
    }

    pub fn collection(&self, kind: Kind) -> &[Entity] {
        self.collections
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self, kind: Kind) -> usize {
        self.collection(kind).len()
    }

    pub fn total_len(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }
}

impl EntitySource for DataStore {
    fn lookup(&self, kind: Kind, key: &str) -> Option<&Entity> {
        self.collection(kind).iter().find(|entity| {
            entity.matches(key)
                && ddi_model::classify::explicit_tag(entity.as_map())
                    .is_none_or(|tag| tag == kind.as_str())
        })
    }
}

fn read_collection(path: &Path) -> Result<Vec<Entity>> {
    let text = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let value: Value = serde_json::from_str(&text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(items) = value else {
        return Err(StoreError::NotAnArray {
            path: path.to_path_buf(),
        });
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            Entity::from_value(item).map_err(|source| StoreError::InvalidEntity {
                path: path.to_path_buf(),
                index,
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entity(value: Value) -> Entity {
        Entity::from_value(value).unwrap()
    }

    #[test]
    fn lookup_by_id_and_urn() {
        let store = DataStore::new()
            .with_collection(
                Kind::Concept,
                vec![entity(json!({"id": "c1", "agencyID": "ex", "version": "1.0.0"}))],
            )
            .unwrap();
        assert!(store.lookup(Kind::Concept, "c1").is_some());
        assert!(store.lookup(Kind::Concept, "urn:ddi:ex:c1:1.0.0").is_some());
        assert!(store.lookup(Kind::Variable, "c1").is_none());
        assert!(store.lookup(Kind::Concept, "c2").is_none());
    }

    #[test]
    fn mismatched_tag_is_not_found() {
        let store = DataStore::new()
            .with_collection(
                Kind::Concept,
                vec![entity(json!({"id": "c1", "typeOfObject": "Variable"}))],
            )
            .unwrap();
        assert!(store.lookup(Kind::Concept, "c1").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = DataStore::new()
            .with_collection(
                Kind::Category,
                vec![entity(json!({"id": "x"})), entity(json!({"id": "x"}))],
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { kind: Kind::Category, .. }));
    }
}
