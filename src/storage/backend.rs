//! Durable key-value storage abstraction.
//!
//! This module defines the [`KeyValueStore`] trait the session store persists through.
//! It mirrors the platform key-value storage a mobile client gets (string keys, string
//! values) with one addition: multi-key writes and removals are single operations, so
//! an implementation that can commit them as a unit must do so.

use crate::domain::error::Result;

/// Abstraction over durable string key-value storage.
///
/// # Implementations
///
/// - [`JsonStore`](crate::storage::JsonStore): JSON file with atomic writes (default)
/// - [`MemoryStore`](crate::storage::MemoryStore): process memory, for tests and
///   ephemeral sessions
///
/// # Examples
///
/// ```
/// use mealshare::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set_many(&[("token", "abc".to_string())])?;
/// assert_eq!(store.get("token")?.as_deref(), Some("abc"));
/// # Ok::<(), mealshare::MealShareError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read or decoded.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes every entry in one operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. On failure none of the entries are
    /// guaranteed to be visible.
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<()>;

    /// Removes every key in one operation. Absent keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be committed.
    fn remove_many(&mut self, keys: &[&str]) -> Result<()>;
}
