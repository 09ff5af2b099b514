// src/vm/mod.rs

//! The quantum virtual machine programs are executed on.

mod config;
mod qvm;

pub use config::{MAX_QUBITS_ENV, QvmConfig, SEED_ENV};
pub use qvm::QvmConnection;
