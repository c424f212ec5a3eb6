//! Core trait definitions for persistence.
//!
//! The history store only needs a single named slot that holds a string.
//! Implementations live in [`crate::storage`].

/// A string key-value store.
///
/// Writes replace the whole value; there is no partial update.
pub trait KeyValueStore {
    /// Human-readable backend name (e.g. "file").
    fn name(&self) -> &str;

    /// Read a slot. A missing slot is `Ok(None)`, not an error.
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Write a slot, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Delete a slot. Deleting a missing slot succeeds.
    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
}
