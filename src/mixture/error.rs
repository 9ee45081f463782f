use thiserror::Error;

use crate::phase::{ElementKind, NotInProjectError, ParseKeyError, PropKey, StoreError};

/// Errors raised by mixture operations.
///
/// Every failure here is deterministic given the mixture's state and is
/// reported synchronously; nothing in the core retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MixtureError {
    /// A referenced component does not exist in the project namespace.
    #[error(transparent)]
    NotInProject(#[from] NotInProjectError),

    /// An operation targeted a component that is not part of this mixture.
    #[error("phase {name:?} does not belong to this mixture")]
    NotInMixture { name: String },

    /// A write attempted to shadow a property served by a component.
    ///
    /// Composition data for a component is authoritative either on the
    /// component or as explicitly set on the mixture, never duplicated
    /// silently.
    #[error("{key} is already assigned to a component object")]
    AlreadyOwnedByComponent { key: PropKey },

    /// Mole fractions do not sum to unity in every element instance.
    ///
    /// A blend weighted by a non-unity composition is physically
    /// meaningless, so interleaving refuses to proceed.
    #[error("mole fraction does not add to unity in all {element}s")]
    CompositionNotNormalized { element: ElementKind },

    /// A component lacks the property requested for interleaving.
    #[error("component {component:?} has no {key} array")]
    MissingComponentProperty { component: String, key: PropKey },

    /// A reconciliation step needed a concentration that was never set.
    #[error("component {component:?} has no stored concentration")]
    InsufficientConcentrationData { component: String },

    /// A dotted key string could not be parsed.
    #[error(transparent)]
    InvalidKey(#[from] ParseKeyError),

    /// A property store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
