//! Crate-level determinism, scenario, and property tests.
//!
//! - `determinism.rs`: same seed and inputs give identical worlds
//! - `integration.rs`: end-to-end scenarios through the full step
//! - `properties.rs`: `proptest` invariants over random sessions
//! - `helpers.rs`: hand-built worlds and scripted brains

mod helpers;
mod integration;

// Re-export for convenience
pub use helpers::*;
