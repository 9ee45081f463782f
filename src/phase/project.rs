use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use thiserror::Error;

use super::{Phase, PurePhase};

/// An error returned when a name cannot be resolved in a [`Project`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("phase {0:?} does not belong to this project")]
pub struct NotInProjectError(pub String);

/// The namespace that phases of one simulation live in.
///
/// A project maps unique phase names to live phase objects. Mixtures never
/// own their components; they hold a shared project handle and re-resolve
/// each component by name on every access, so a stale object is never
/// returned.
///
/// The core is single-threaded, so interior mutability through `RefCell`
/// is sufficient for registering phases after the project has been shared.
#[derive(Debug, Default)]
pub struct Project {
    phases: RefCell<BTreeMap<String, Rc<dyn Phase>>>,
}

impl Project {
    /// Creates an empty project.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Registers a pure phase and returns a shared handle to it.
    ///
    /// A phase registered under a name already in use replaces the previous
    /// entry, exactly as rebinding the name would.
    pub fn register(self: &Rc<Self>, phase: PurePhase) -> Rc<dyn Phase> {
        let phase: Rc<dyn Phase> = Rc::new(phase);
        self.phases
            .borrow_mut()
            .insert(phase.name().to_string(), Rc::clone(&phase));
        phase
    }

    /// Resolves a phase by name.
    ///
    /// # Errors
    ///
    /// Returns [`NotInProjectError`] if no phase with that name is
    /// registered.
    pub fn resolve(&self, name: &str) -> Result<Rc<dyn Phase>, NotInProjectError> {
        self.phases
            .borrow()
            .get(name)
            .map(Rc::clone)
            .ok_or_else(|| NotInProjectError(name.to_string()))
    }

    /// Reports whether a phase with the given name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.phases.borrow().contains_key(name)
    }

    /// Removes a phase from the namespace, returning it if present.
    pub fn deregister(&self, name: &str) -> Option<Rc<dyn Phase>> {
        self.phases.borrow_mut().remove(name)
    }
}
