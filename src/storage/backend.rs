//! Key-value store abstraction.
//!
//! Per-owner state is persisted as plain string values under derived keys. The
//! [`KeyValueStore`] trait keeps that contract minimal so the recent-repositories
//! cache does not care whether it is backed by a file or by memory.
//!
//! Writes are staged by [`KeyValueStore::put`] and become durable only after
//! [`KeyValueStore::commit`], mirroring a preferences editor with a synchronous commit.

use crate::domain::error::Result;

/// Abstraction over persistent string-valued key-value backends.
///
/// # Implementations
///
/// - [`JsonStore`](super::JsonStore): JSON file with atomic writes (default)
/// - [`MemoryStore`](super::MemoryStore): in-process map, nothing durable
///
/// # Examples
///
/// ```
/// use hubrecents::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.put("greeting", "hello")?;
/// store.commit()?;
/// assert_eq!(store.get("greeting")?.as_deref(), Some("hello"));
/// # Ok::<(), hubrecents::RecentsError>(())
/// ```
pub trait KeyValueStore {
    /// Returns the value stored under `key`, or `Ok(None)` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stages `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn put(&mut self, key: &str, value: &str) -> Result<()>;

    /// Stages removal of `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Makes all staged writes durable. Blocks until the backend has finished.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be written out.
    fn commit(&mut self) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).put(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn commit(&mut self) -> Result<()> {
        (**self).commit()
    }
}
