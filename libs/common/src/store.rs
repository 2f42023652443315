//! In-memory storage for the ResidentialHub application
//!
//! This module provides the collection primitives backing every repository:
//! `Table` for append-ordered records addressed by integer id, and `Index`
//! for records addressed by a unique key. State lives for the lifetime of
//! the process; a restart clears all collections.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

/// Append-ordered collection of records, the in-memory analog of a table.
///
/// Clones share the same underlying rows. Callers that derive a new id and
/// append the record must do both under a single `write` guard so id
/// assignment stays atomic with the insert.
#[derive(Debug)]
pub struct Table<T> {
    rows: Arc<RwLock<Vec<T>>>,
}

impl<T> Table<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a table pre-populated with the given rows
    pub fn seeded(rows: Vec<T>) -> Self {
        info!("Seeding table with {} rows", rows.len());
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    /// Acquire a shared read guard over the rows
    pub async fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.rows.read().await
    }

    /// Acquire an exclusive write guard over the rows
    pub async fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.rows.write().await
    }

    /// Number of rows currently stored
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the table holds no rows
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<T: Clone> Table<T> {
    /// Copy of all rows at this instant
    pub async fn snapshot(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }
}

impl<T> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Keyed collection of records, the in-memory analog of a key-value store.
///
/// Clones share the same underlying entries.
#[derive(Debug)]
pub struct Index<K, V> {
    entries: Arc<RwLock<HashMap<K, V>>>,
}

impl<K: Eq + Hash, V> Index<K, V> {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a value under the given key, returning the previous value
    pub async fn insert(&self, key: K, value: V) -> Option<V> {
        self.entries.write().await.insert(key, value)
    }

    /// Remove the entry for the given key if present
    ///
    /// Removing an absent key is a no-op; the return value reports whether
    /// an entry was actually removed.
    pub async fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.write().await.remove(key).is_some()
    }

    /// Whether an entry exists for the given key
    pub async fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.read().await.contains_key(key)
    }

    /// Acquire a shared read guard over the entries
    pub async fn read(&self) -> RwLockReadGuard<'_, HashMap<K, V>> {
        self.entries.read().await
    }

    /// Acquire an exclusive write guard over the entries
    pub async fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, V>> {
        self.entries.write().await
    }

    /// Number of entries currently stored
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the index holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<K: Eq + Hash, V: Clone> Index<K, V> {
    /// Copy of the value stored under the given key
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.read().await.get(key).cloned()
    }

    /// Copy of all values at this instant
    pub async fn values(&self) -> Vec<V> {
        self.entries.read().await.values().cloned().collect()
    }
}

impl<K, V> Clone for Index<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K: Eq + Hash, V> Default for Index<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
