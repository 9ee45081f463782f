//! Supporting utilities used across the crate.

pub mod constraint;
