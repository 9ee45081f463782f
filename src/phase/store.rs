use std::collections::BTreeMap;

use thiserror::Error;

use super::{ElementKind, PropKey};

/// Errors raised by [`PropertyStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The requested key has no stored array.
    #[error("key not found: {0}")]
    KeyNotFound(PropKey),

    /// The array length does not match the element count for its kind.
    #[error("array for {key} has length {got}, expected {expected}")]
    LengthMismatch {
        key: PropKey,
        expected: usize,
        got: usize,
    },
}

/// Associative per-element array storage.
///
/// Maps a [`PropKey`] to a fixed-length `f64` array with one value per
/// element instance of the key's kind. The pore and throat counts are set
/// at construction and every stored array must match them exactly.
///
/// Arrays use `NaN` as the "unset" sentinel: a value that has been
/// declared but not yet determined.
#[derive(Debug, Clone)]
pub struct PropertyStore {
    num_pores: usize,
    num_throats: usize,
    data: BTreeMap<PropKey, Vec<f64>>,
}

impl PropertyStore {
    /// Creates an empty store sized for the given network.
    #[must_use]
    pub fn new(num_pores: usize, num_throats: usize) -> Self {
        Self {
            num_pores,
            num_throats,
            data: BTreeMap::new(),
        }
    }

    /// Returns the number of element instances of the given kind.
    #[must_use]
    pub fn count(&self, element: ElementKind) -> usize {
        match element {
            ElementKind::Pore => self.num_pores,
            ElementKind::Throat => self.num_throats,
        }
    }

    /// Returns the stored array for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyNotFound`] if nothing is stored under `key`.
    pub fn get(&self, key: &PropKey) -> Result<&[f64], StoreError> {
        self.data
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| StoreError::KeyNotFound(key.clone()))
    }

    /// Stores `values` under `key`, replacing any existing array.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LengthMismatch`] if the array length differs
    /// from the element count for the key's kind.
    pub fn set(&mut self, key: PropKey, values: Vec<f64>) -> Result<(), StoreError> {
        let expected = self.count(key.element());
        if values.len() != expected {
            return Err(StoreError::LengthMismatch {
                key,
                expected,
                got: values.len(),
            });
        }
        self.data.insert(key, values);
        Ok(())
    }

    /// Removes and returns the array stored under `key`, if any.
    pub fn remove(&mut self, key: &PropKey) -> Option<Vec<f64>> {
        self.data.remove(key)
    }

    /// Reports whether an array is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &PropKey) -> bool {
        self.data.contains_key(key)
    }

    /// Iterates over all stored keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &PropKey> {
        self.data.keys()
    }

    /// Stores an all-`NaN` (unset) array under `key`.
    pub(crate) fn set_unset(&mut self, key: PropKey) {
        let n = self.count(key.element());
        self.data.insert(key, vec![f64::NAN; n]);
    }

    /// Stores an array whose length is already known to match the element
    /// count, bypassing the fallible length check.
    pub(crate) fn insert_sized(&mut self, key: PropKey, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.count(key.element()));
        self.data.insert(key, values);
    }
}

/// Reports whether an array is still (partially) unset.
pub(crate) fn is_unset(values: &[f64]) -> bool {
    values.iter().any(|v| v.is_nan())
}
