//! Multi-component mixtures and their composition bookkeeping.
//!
//! A [`Mixture`] is a phase assembled from pure phases registered in a
//! shared [`Project`]. It does not own its components; it tracks them by
//! name and re-resolves them through the project on every access, so a
//! component may belong to several mixtures at once.
//!
//! The mixture answers property lookups through a three-stage fallback:
//!
//! 1. **Direct**: the key is stored on the mixture itself.
//! 2. **Delegated**: the key is qualified by a component name, and the
//!    lookup is forwarded to that component.
//! 3. **Interleaved**: the key names a derived property, computed as the
//!    mole-fraction-weighted blend of each component's value.
//!
//! Composition (mole fractions and concentrations per component) is kept
//! consistent by the reconciliation operations
//! ([`Mixture::update_from_free_component`],
//! [`Mixture::update_from_concentrations`]) and audited by
//! [`Mixture::check_health`].

mod advisory;
mod error;
mod health;
mod reconcile;
mod registry;
mod resolver;

#[cfg(test)]
mod test_support;

pub use advisory::Advisory;
pub use error::MixtureError;
pub use health::MixtureHealth;

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use crate::phase::{ElementKind, Phase, Project, PropKey, PropertyStore};

/// A phase representing a multi-component fluid mixture.
///
/// Created against a [`Project`] namespace and sized for the network's
/// pore and throat counts. Components are added afterwards (or up front
/// via [`Mixture::with_components`]); composition arrays start out unset
/// (`NaN`) until the caller specifies mole fractions or concentrations.
///
/// ```
/// use poremix::mixture::Mixture;
/// use poremix::phase::{ElementKind, Project, PropKey, PurePhase};
///
/// let project = Project::new();
/// let mut n2 = PurePhase::new("n2", 9, 12);
/// n2.set(PropKey::new(ElementKind::Pore, "molecular_weight"), 0.028)
///     .unwrap();
/// let n2 = project.register(n2);
///
/// let mut mix = Mixture::new("gas", &project, 9, 12);
/// mix.add_component(n2.as_ref()).unwrap();
/// mix.set_mole_fraction(ElementKind::Pore, "n2", 1.0).unwrap();
/// ```
#[derive(Debug)]
pub struct Mixture {
    name: String,
    project: Rc<Project>,
    store: PropertyStore,
    components: BTreeSet<String>,
    advisories: Vec<Advisory>,
}

impl Mixture {
    /// Creates an empty mixture in the given project namespace.
    ///
    /// The aggregate pore mole fraction is seeded unset; it only becomes
    /// meaningful once components and their compositions are supplied.
    pub fn new(
        name: impl Into<String>,
        project: &Rc<Project>,
        num_pores: usize,
        num_throats: usize,
    ) -> Self {
        let mut store = PropertyStore::new(num_pores, num_throats);
        store.set_unset(PropKey::mole_fraction_all(ElementKind::Pore));
        Self {
            name: name.into(),
            project: Rc::clone(project),
            store,
            components: BTreeSet::new(),
            advisories: Vec::new(),
        }
    }

    /// Creates a mixture and registers the given components in one step.
    ///
    /// Each component's pore mole fraction is seeded unset.
    ///
    /// # Errors
    ///
    /// Returns [`MixtureError::NotInProject`] if any component is not
    /// registered in the project.
    pub fn with_components<'a>(
        name: impl Into<String>,
        project: &Rc<Project>,
        num_pores: usize,
        num_throats: usize,
        components: impl IntoIterator<Item = &'a dyn Phase>,
    ) -> Result<Self, MixtureError> {
        let mut mixture = Self::new(name, project, num_pores, num_throats);
        mixture.add_components(components)?;
        Ok(mixture)
    }

    /// The mixture's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read access to the mixture's own backing store.
    ///
    /// Only directly stored arrays are visible here; delegated and
    /// interleaved values are served by [`Mixture::get`].
    #[must_use]
    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    /// Advisory findings accumulated since the last drain.
    #[must_use]
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// Removes and returns all accumulated advisory findings.
    pub fn drain_advisories(&mut self) -> Vec<Advisory> {
        std::mem::take(&mut self.advisories)
    }

    pub(crate) fn advise(&mut self, advisory: Advisory) {
        self.advisories.push(advisory);
    }
}

/// Non-authoritative human-readable summary of the mixture.
impl fmt::Display for Mixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mixture: {}", self.name)?;
        writeln!(f, "Component Phases")?;
        for name in &self.components {
            writeln!(f, "  {name}")?;
        }
        Ok(())
    }
}
