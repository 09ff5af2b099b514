// src/core/mod.rs

//! Core data structures and types

pub mod bits;
pub mod error;
pub mod state;

// Re-export public types for convenient access via `qlogic::core::TypeName`
pub use bits::BitString;
pub use error::{QlogicError, QubitId, Result};
pub use state::StateVector;
