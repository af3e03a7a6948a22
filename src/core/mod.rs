//! Core primitives.
//!
//! Randomness and angle arithmetic shared by the wheel engine.

pub mod angle;
pub mod rng;

// Re-export core types
pub use angle::{normalize_degrees, FULL_TURN};
pub use rng::{derive_spin_seed, DeterministicRng, RandomSource};
