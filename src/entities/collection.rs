use std::{fmt, marker::PhantomData};

use indexmap::IndexMap;

/// A `key -> value` pair that an entity owns inside a [`KeyedCollection`].
pub trait KeyedEntry: From<(String, String)> + Into<(String, String)> {
    /// Used in log events to say what kind of entry collapsed.
    const KIND: &'static str;
}

/// Entries of one kind, unique by key.
///
/// When the same key is supplied twice the later value wins and the entry keeps
/// the position of its first insertion, so iteration order is deterministic.
/// Equality ignores that order: two collections are equal when they hold the
/// same keys with the same values.
pub struct KeyedCollection<T> {
    entries: IndexMap<String, String>,
    _entry: PhantomData<fn() -> T>,
}

impl<T: KeyedEntry> KeyedCollection<T> {
    pub fn new() -> Self {
        KeyedCollection {
            entries: IndexMap::new(),
            _entry: PhantomData,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy the entries out in insertion order.
    pub fn to_vec(&self) -> Vec<T> {
        self.entries
            .iter()
            .map(|(k, v)| T::from((k.clone(), v.clone())))
            .collect()
    }

    fn insert(&mut self, entry: T) {
        let (key, value) = entry.into();
        if let Some(previous) = self.entries.get(&key) {
            tracing::debug!(
                kind = T::KIND,
                key = %key,
                previous = %previous,
                "duplicate key, keeping the last value"
            );
        }
        self.entries.insert(key, value);
    }
}

impl<T: KeyedEntry> FromIterator<T> for KeyedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = KeyedCollection::new();
        for entry in iter {
            collection.insert(entry);
        }
        collection
    }
}

impl<T: KeyedEntry> From<Vec<T>> for KeyedCollection<T> {
    fn from(entries: Vec<T>) -> Self {
        entries.into_iter().collect()
    }
}

impl<T: KeyedEntry> Default for KeyedCollection<T> {
    fn default() -> Self {
        KeyedCollection::new()
    }
}

impl<T> Clone for KeyedCollection<T> {
    fn clone(&self) -> Self {
        KeyedCollection {
            entries: self.entries.clone(),
            _entry: PhantomData,
        }
    }
}

impl<T> PartialEq for KeyedCollection<T> {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality is by lookup, not by position
        self.entries == other.entries
    }
}

impl<T> Eq for KeyedCollection<T> {}

impl<T: KeyedEntry> fmt::Debug for KeyedCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}
