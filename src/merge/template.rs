//! Structural inspection of IDE templates.

use crate::constants::{SERVERS_KEYS, TYPE_FIELD};
use serde_json::Value;

/// Read-only view over an IDE template.
///
/// Everything the merge engine needs to know about an IDE's file format is
/// derived from the shape of its template, never from the IDE key.
#[derive(Debug, Clone, Copy)]
pub struct Template<'a> {
    value: &'a Value,
}

impl<'a> Template<'a> {
    /// Wrap a template value.
    pub fn new(value: &'a Value) -> Self {
        Self {
            value,
        }
    }

    /// The first recognized servers key present at top level as an object.
    pub fn servers_key(&self) -> Option<&'static str> {
        SERVERS_KEYS.iter().copied().find(|key| self.value.get(*key).is_some_and(Value::is_object))
    }

    /// Whether the placeholder entries in the servers container declare a
    /// transport `type`.
    pub fn is_typed(&self) -> bool {
        self.servers_key()
            .and_then(|key| self.value.get(key))
            .and_then(Value::as_object)
            .is_some_and(|container| {
                container.values().any(|entry| entry.get(TYPE_FIELD).is_some())
            })
    }
}
