// src/simulation/mod.rs

//! State-vector simulation of [`Program`]s.
//!
//! [`Simulator`] is the deterministic entry point: it evolves `|0...0>`
//! through a program and hands back the final amplitudes. Sampling of
//! measurement outcomes lives one layer up in [`crate::vm`].

pub(crate) mod engine;

use crate::circuits::Program;
use crate::core::{Result, StateVector};
use engine::SimulationEngine;
use tracing::debug;

/// Largest register the simulator accepts unless configured otherwise.
pub const DEFAULT_MAX_QUBITS: usize = 20;

/// Computes wavefunctions of programs.
#[derive(Debug, Clone)]
pub struct Simulator {
    max_qubits: usize,
}

impl Default for Simulator {
    fn default() -> Self {
        Self { max_qubits: DEFAULT_MAX_QUBITS }
    }
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator that refuses programs touching more than
    /// `max_qubits` distinct qubits.
    pub fn with_max_qubits(max_qubits: usize) -> Self {
        Self { max_qubits }
    }

    /// Runs `program` from `|0...0>` and returns the final state.
    ///
    /// Amplitude index bit `i` corresponds to the `i`-th smallest qubit id
    /// in `program.qubits()`.
    ///
    /// # Errors
    /// * `QlogicError::TooManyQubits` if the program is wider than the limit.
    /// * `QlogicError::InvalidOperation` for gates repeating a qubit.
    pub fn wavefunction(&self, program: &Program) -> Result<StateVector> {
        let mut engine = SimulationEngine::init(program.qubits(), self.max_qubits)?;
        engine.run(program)?;
        engine.validate_norm()?;
        debug!(gates = program.len(), qubits = program.qubits().len(), "wavefunction computed");
        Ok(engine.state().clone())
    }
}
