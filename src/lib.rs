//! Clever Girl - companion attribute management with a host compatibility layer

pub mod attributes;
pub mod compat;
pub mod core;
pub mod host;
