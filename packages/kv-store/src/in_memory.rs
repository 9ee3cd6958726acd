//! In-memory store.
//!
//! Keeps every key in a `BTreeMap` so iteration is in key order. Used as the
//! staging area of a compilation and as the test double everywhere else.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::{KvReader, KvWriter, StoreError};

/// An in-memory key-value store.
///
/// # Example
///
/// ```rust
/// use gopherkv_store::{Bytes, InMemoryStore, KvWriter};
///
/// let mut staging = InMemoryStore::new();
/// staging.set("/b", Bytes::from_static(b"2")).unwrap();
/// staging.set("/a", Bytes::from_static(b"1")).unwrap();
///
/// let keys: Vec<&str> = staging.keys().collect();
/// assert_eq!(keys, vec!["/a", "/b"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryStore {
    data: BTreeMap<String, Bytes>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Key/value pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bytes)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Borrow a value without going through the fallible trait.
    pub fn value(&self, key: &str) -> Option<&Bytes> {
        self.data.get(key)
    }

    /// Copy every staged key into `target`, in key order.
    ///
    /// Stops at the first failed write; keys written before the failure stay
    /// written. Returns the number of keys copied.
    pub fn flush_into(&self, target: &mut dyn KvWriter) -> Result<usize, StoreError> {
        let mut written = 0;
        for (key, value) in &self.data {
            log::debug!("Flushing {} ({} bytes)...", key, value.len());
            // Bytes clones are reference-counted, not deep copies.
            target.set(key, value.clone())?;
            written += 1;
        }
        Ok(written)
    }
}

impl KvReader for InMemoryStore {
    fn get(&mut self, key: &str) -> Result<Option<Bytes>, StoreError> {
        Ok(self.data.get(key).cloned())
    }
}

impl KvWriter for InMemoryStore {
    fn set(&mut self, key: &str, value: Bytes) -> Result<(), StoreError> {
        self.data.insert(key.to_string(), value);
        Ok(())
    }
}
