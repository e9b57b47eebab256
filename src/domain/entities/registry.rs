//! The authoritative mapping from short code to link record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::link::{LinkRecord, ShortLink};

/// Short code → [`LinkRecord`] map.
///
/// Serializes transparently as a JSON object keyed by code, which is the
/// on-disk document format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry(BTreeMap<String, LinkRecord>);

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn get(&self, code: &str) -> Option<&LinkRecord> {
        self.0.get(code)
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut LinkRecord> {
        self.0.get_mut(code)
    }

    /// Inserts a record under a code that must not already be present.
    ///
    /// Returns `false` and leaves the registry untouched on collision.
    pub fn insert_new(&mut self, code: String, record: LinkRecord) -> bool {
        if self.0.contains_key(&code) {
            return false;
        }
        self.0.insert(code, record);
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every link with its code, in registry iteration order.
    pub fn links(&self) -> Vec<ShortLink> {
        self.0
            .iter()
            .map(|(code, record)| ShortLink::new(code.clone(), record.clone()))
            .collect()
    }
}
