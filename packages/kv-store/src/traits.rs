//! Core traits for the store layer.

use bytes::Bytes;

use crate::StoreError;

/// Write bytes under a key.
///
/// The compiler only ever needs this half: menus and blobs are written once
/// and never read back during a run.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn KvWriter>`.
pub trait KvWriter: Send {
    /// Store `value` under `key`, replacing whatever was there.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gopherkv_store::{Bytes, KvWriter, StoreError};
    ///
    /// fn publish_menu(store: &mut dyn KvWriter, menu: &str) -> Result<(), StoreError> {
    ///     store.set("/", Bytes::copy_from_slice(menu.as_bytes()))
    /// }
    /// ```
    fn set(&mut self, key: &str, value: Bytes) -> Result<(), StoreError>;
}

/// Read bytes back from a key.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn KvReader>`.
pub trait KvReader: Send {
    /// Fetch the value under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Nothing is stored under the key (not an error condition).
    /// * `Ok(Some(bytes))` - The stored value.
    /// * `Err(StoreError)` - A transport or protocol error occurred.
    fn get(&mut self, key: &str) -> Result<Option<Bytes>, StoreError>;
}

/// Combined read/write.
///
/// Automatically implemented for any type that implements both `KvReader`
/// and `KvWriter`.
pub trait KvStore: KvReader + KvWriter {}
impl<T: KvReader + KvWriter> KvStore for T {}

// Blanket implementations for references and boxes

impl<T: KvReader + ?Sized> KvReader for &mut T {
    fn get(&mut self, key: &str) -> Result<Option<Bytes>, StoreError> {
        (*self).get(key)
    }
}

impl<T: KvWriter + ?Sized> KvWriter for &mut T {
    fn set(&mut self, key: &str, value: Bytes) -> Result<(), StoreError> {
        (*self).set(key, value)
    }
}

impl<T: KvReader + ?Sized> KvReader for Box<T> {
    fn get(&mut self, key: &str) -> Result<Option<Bytes>, StoreError> {
        self.as_mut().get(key)
    }
}

impl<T: KvWriter + ?Sized> KvWriter for Box<T> {
    fn set(&mut self, key: &str, value: Bytes) -> Result<(), StoreError> {
        self.as_mut().set(key, value)
    }
}
