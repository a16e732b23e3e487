//! Get-or-insert and add-or-replace for key-value maps.
//!
//! # Responsibility
//! - Give plain maps a get-or-create / add-or-replace surface.
//! - Give concurrent maps an atomic get-or-create.
//!
//! # Invariants
//! - A present key's value is returned untouched; the default is dropped.
//! - Plain maps are not synchronized: check-then-insert under external
//!   concurrent use is the caller's responsibility.
//! - On `DashMap`, insert-if-absent is one entry operation, so every
//!   concurrent caller for a missing key observes the same stored value.

use dashmap::DashMap;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Map helpers for `HashMap` and `BTreeMap`.
pub trait MapExt<K, V> {
    /// Returns the value for `key`, inserting `default` first if absent.
    fn get_or_create_with(&mut self, key: K, default: V) -> &mut V;

    /// Sets `key` to `value` unconditionally. Returns the replaced value.
    fn add_or_replace(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value for `key`, inserting `V::default()` first if absent.
    fn get_or_create(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_create_with(key, V::default())
    }
}

impl<K, V, S> MapExt<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn get_or_create_with(&mut self, key: K, default: V) -> &mut V {
        self.entry(key).or_insert(default)
    }

    fn add_or_replace(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value)
    }
}

impl<K: Ord, V> MapExt<K, V> for BTreeMap<K, V> {
    fn get_or_create_with(&mut self, key: K, default: V) -> &mut V {
        self.entry(key).or_insert(default)
    }

    fn add_or_replace(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value)
    }
}

/// Returns the stored value for `key`, atomically inserting `default` first
/// if absent.
///
/// The value is returned by clone; store `Arc<T>` to share one instance.
pub fn get_or_create_shared<K, V, S>(map: &DashMap<K, V, S>, key: K, default: V) -> V
where
    K: Eq + Hash,
    V: Clone,
    S: BuildHasher + Clone,
{
    map.entry(key).or_insert(default).clone()
}

/// [`get_or_create_shared`] with `V::default()`, built only when absent.
pub fn get_or_create_shared_default<K, V, S>(map: &DashMap<K, V, S>, key: K) -> V
where
    K: Eq + Hash,
    V: Clone + Default,
    S: BuildHasher + Clone,
{
    map.entry(key).or_default().clone()
}
