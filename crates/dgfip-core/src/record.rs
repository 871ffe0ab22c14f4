//! # Internal Record
//!
//! A tax record as the store holds it: a flat map of field name to string.
//! An empty string means "known field, no value", which is not the same as
//! an absent key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::identity::ReconciliationCriteria;

/// Flat `field -> value` tax record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InternalRecord(BTreeMap<String, String>);

impl InternalRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Value of `field`, if the key exists.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Set `field`, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(field.into(), value.into())
    }

    /// Whether the record has a key named `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Record identifier (`SPI`), if present.
    pub fn spi(&self) -> Option<&str> {
        self.get("SPI")
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every criteria field is present with exactly the expected value.
    pub fn matches(&self, criteria: &ReconciliationCriteria) -> bool {
        criteria
            .fields()
            .iter()
            .all(|(field, expected)| self.get(field) == Some(*expected))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InternalRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
