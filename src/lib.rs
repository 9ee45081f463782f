//! # Poremix
//!
//! Multi-component mixture composition modeling for pore-network
//! simulations.
//!
//! A pore network discretizes a porous medium into pores and throats, and
//! every physical property of a fluid in that network is a per-element
//! array (one value per pore, or one per throat). A
//! [`Mixture`](mixture::Mixture) represents a multi-component fluid as a
//! composite of independently modeled pure phases: it tracks which phases
//! constitute the mixture, keeps their mole fractions and concentrations
//! consistent, and answers property lookups that may be served directly,
//! delegated to a component, or computed as a composition-weighted blend.
//!
//! ## Crate layout
//!
//! - [`phase`]: Property keys, per-element storage, pure phases, and the
//!   project namespace that mixtures resolve their components through.
//! - [`mixture`]: The mixture itself: component registry, key resolution,
//!   composition reconciliation, and health checks.
//! - [`support`]: Supporting utilities used across the crate.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod mixture;
pub mod phase;
pub mod support;
