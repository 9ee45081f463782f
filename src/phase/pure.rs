use std::fmt;

use super::{ElementValues, PropKey, PropertyStore, StoreError};

/// A phase object a mixture can be composed of.
///
/// Mixtures treat their components as read-only: this trait exposes only
/// lookups, and a component's data changes only through the component's
/// own API. A component may be shared by several mixtures; coordinating
/// concurrent mutation of a shared component is the caller's
/// responsibility, not this crate's.
///
/// The `Debug` supertrait lets projects and mixtures holding trait
/// objects derive their own `Debug` impls.
pub trait Phase: fmt::Debug {
    /// The phase's name, unique within its project.
    fn name(&self) -> &str;

    /// Returns the phase's array for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyNotFound`] if the phase has no such
    /// property.
    fn get(&self, key: &PropKey) -> Result<Vec<f64>, StoreError>;

    /// Lists every property key the phase currently stores, sorted.
    fn props(&self) -> Vec<PropKey>;
}

/// A pure single-component phase backed by its own [`PropertyStore`].
///
/// Pure phases are built and populated first, then registered with a
/// [`Project`](super::Project) so mixtures can resolve them by name.
///
/// ```
/// use poremix::phase::{ElementKind, PropKey, PurePhase};
///
/// let mut water = PurePhase::new("water", 4, 5);
/// water
///     .set(PropKey::new(ElementKind::Pore, "density"), 998.2)
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PurePhase {
    name: String,
    store: PropertyStore,
}

impl PurePhase {
    /// Creates an empty phase sized for the given network.
    pub fn new(name: impl Into<String>, num_pores: usize, num_throats: usize) -> Self {
        Self {
            name: name.into(),
            store: PropertyStore::new(num_pores, num_throats),
        }
    }

    /// Stores a property array, broadcasting a scalar to the element count.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LengthMismatch`] if a per-element array of the
    /// wrong length is given.
    pub fn set(
        &mut self,
        key: PropKey,
        values: impl Into<ElementValues>,
    ) -> Result<(), StoreError> {
        let values = values.into().materialize(self.store.count(key.element()));
        self.store.set(key, values)
    }

    /// Read access to the phase's backing store.
    #[must_use]
    pub fn store(&self) -> &PropertyStore {
        &self.store
    }
}

impl Phase for PurePhase {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &PropKey) -> Result<Vec<f64>, StoreError> {
        self.store.get(key).map(<[f64]>::to_vec)
    }

    fn props(&self) -> Vec<PropKey> {
        self.store.keys().cloned().collect()
    }
}
