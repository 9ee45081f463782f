//! Phases and the storage they share.
//!
//! A phase is a fluid occupying the pore network, and every quantity it
//! carries is a per-element array keyed by a [`PropKey`]. Pure phases own
//! their data outright; mixtures (see [`crate::mixture`]) borrow theirs
//! from the pure phases registered in a shared [`Project`] namespace.

mod key;
mod project;
mod pure;
mod store;
mod values;

pub use key::{ElementKind, ParseKeyError, PropKey, Qualifier};
pub use project::{NotInProjectError, Project};
pub use pure::{Phase, PurePhase};
pub use store::{PropertyStore, StoreError};
pub(crate) use store::is_unset;
pub use values::ElementValues;
