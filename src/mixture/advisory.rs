use std::fmt;

use crate::phase::ElementKind;

/// An advisory finding reported by a composition setter.
///
/// Advisories flag physically questionable inputs that the model
/// nevertheless accepts: the mixture tolerates transient inconsistency
/// during incremental setup and only refuses to *compute* derived
/// quantities from it. They accumulate on the mixture and are read or
/// drained via [`Mixture::advisories`](super::Mixture::advisories) and
/// [`Mixture::drain_advisories`](super::Mixture::drain_advisories).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// A stored mole fraction lies outside `[0, 1]`.
    MoleFractionOutOfRange {
        component: String,
        element: ElementKind,
        /// The number of offending element instances.
        count: usize,
    },
    /// A stored concentration is negative.
    NegativeConcentration {
        component: String,
        element: ElementKind,
        /// The number of offending element instances.
        count: usize,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoleFractionOutOfRange {
                component,
                element,
                count,
            } => write!(
                f,
                "mole fraction of {component:?} is outside the range 0 -> 1 in {count} {element}s"
            ),
            Self::NegativeConcentration {
                component,
                element,
                count,
            } => write!(
                f,
                "concentration of {component:?} is negative in {count} {element}s"
            ),
        }
    }
}
