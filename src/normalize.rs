//! Normalization of raw content-backend entities.
//!
//! The backend returns entities in two shapes: a legacy wrapper
//! `{ id, documentId, attributes: {...} }` or a flat record with fields at
//! the top level. Relations likewise appear either wrapped in `{ data: ... }`
//! or as an already-resolved value. Both discriminants are checked exactly
//! once here; downstream mapping code only ever sees flat field maps.
//!
//! Nothing in this module errors on malformed input. A field of the wrong
//! type simply goes missing.

use serde_json::{Map, Value};

/// Collapse an entity into a flat field map.
///
/// Wrapped entities are unwrapped (`id`/`documentId` carried over, attribute
/// fields spread on top); flat entities pass through. Null and non-object
/// values yield `None`. Idempotent: an already-flat map comes back unchanged.
pub fn normalize_entity(value: &Value) -> Option<Map<String, Value>> {
    let entity = value.as_object()?;

    match entity.get("attributes").and_then(Value::as_object) {
        Some(attributes) => {
            let mut flat = Map::new();
            if let Some(id) = entity.get("id") {
                flat.insert("id".to_string(), id.clone());
            }
            if let Some(document_id) = entity.get("documentId") {
                flat.insert("documentId".to_string(), document_id.clone());
            }
            for (key, nested) in attributes {
                flat.insert(key.clone(), nested.clone());
            }
            Some(flat)
        }
        None => Some(entity.clone()),
    }
}

/// A relation value after unwrapping, discriminated by cardinality.
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    Empty,
    One(Map<String, Value>),
    Many(Vec<Map<String, Value>>),
}

impl Relation {
    /// The single related entity, if any. A many-valued relation yields its
    /// first entry.
    pub fn one(self) -> Option<Map<String, Value>> {
        match self {
            Relation::Empty => None,
            Relation::One(entity) => Some(entity),
            Relation::Many(entities) => entities.into_iter().next(),
        }
    }

    /// All related entities. A single-valued relation yields a one-entry
    /// list.
    pub fn many(self) -> Vec<Map<String, Value>> {
        match self {
            Relation::Empty => Vec::new(),
            Relation::One(entity) => vec![entity],
            Relation::Many(entities) => entities,
        }
    }
}

/// Unwrap a relation value in either backend shape.
///
/// `{ data: ... }` wrappers are unwrapped (arrays element-wise); anything
/// else is treated as an already-resolved entity.
pub fn normalize_relation(value: &Value) -> Relation {
    let wrapped = value
        .as_object()
        .and_then(|object| object.get("data"));

    let inner = match wrapped {
        Some(data) => data,
        None => value,
    };

    match inner {
        Value::Array(items) => {
            Relation::Many(items.iter().filter_map(normalize_entity).collect())
        }
        other => match normalize_entity(other) {
            Some(entity) => Relation::One(entity),
            None => Relation::Empty,
        },
    }
}
