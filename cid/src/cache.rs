use std::{
  collections::BTreeMap,
  sync::{
    PoisonError,
    RwLock,
    RwLockReadGuard,
    RwLockWriteGuard,
  },
};

/// Memoized string encodings of one CID, keyed by multibase prefix.
///
/// Entries are only ever added. Racing writers compute the same string, so
/// whichever lands first is kept and the other is dropped.
#[derive(Debug, Default)]
pub(crate) struct StringCache(RwLock<BTreeMap<char, String>>);

impl StringCache {
  fn read(&self) -> RwLockReadGuard<'_, BTreeMap<char, String>> {
    self.0.read().unwrap_or_else(PoisonError::into_inner)
  }

  fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<char, String>> {
    self.0.write().unwrap_or_else(PoisonError::into_inner)
  }

  pub(crate) fn get(&self, prefix: char) -> Option<String> {
    self.read().get(&prefix).cloned()
  }

  /// Stores `value` unless `prefix` already has an entry.
  pub(crate) fn insert(&self, prefix: char, value: String) {
    self.write().entry(prefix).or_insert(value);
  }

  pub(crate) fn get_or_insert_with<F>(&self, prefix: char, f: F) -> String
  where F: FnOnce() -> String {
    if let Some(hit) = self.get(prefix) {
      return hit;
    }
    let value = f();
    self.write().entry(prefix).or_insert(value).clone()
  }

  #[cfg(test)]
  pub(crate) fn len(&self) -> usize { self.read().len() }
}

impl Clone for StringCache {
  fn clone(&self) -> Self { StringCache(RwLock::new(self.read().clone())) }
}
