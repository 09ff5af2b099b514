// src/vm/qvm.rs

//! Defines the QVM connection programs are submitted to.

use super::config::QvmConfig;
use crate::circuits::Program;
use crate::core::{QlogicError, QubitId, Result, StateVector};
use crate::simulation::engine::SimulationEngine;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, debug_span};

/// A handle to the quantum virtual machine.
///
/// Each call to [`run_and_measure`](QvmConnection::run_and_measure)
/// simulates the program once from `|0...0>` and then samples the requested
/// qubits `trials` times. The connection holds no per-program state, so one
/// handle can be shared by reference for the whole process.
///
/// # Examples
///
/// ```
/// # use qlogic::{Gate, Program, QvmConnection, QlogicError};
/// let qvm = QvmConnection::new();
/// let program = Program::new().inst(Gate::x(0)).inst(Gate::cnot(0, 1));
/// let result = qvm.run_and_measure(&program, &[0, 1, 2], 1)?;
/// assert_eq!(result, vec![vec![1, 1, 0]]);
/// # Ok::<(), QlogicError>(())
/// ```
#[derive(Debug, Default)]
pub struct QvmConnection {
    config: QvmConfig,
    /// Counts runs so seeded connections give each run its own stream.
    runs: AtomicU64,
}

impl QvmConnection {
    /// Creates a connection with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a connection with the given settings.
    pub fn with_config(config: QvmConfig) -> Self {
        Self { config, runs: AtomicU64::new(0) }
    }

    /// The connection's settings.
    pub fn config(&self) -> &QvmConfig {
        &self.config
    }

    /// Runs `program` and measures `qubits`, `trials` times.
    ///
    /// Returns one vector per trial, holding the measured bit of each
    /// requested qubit in request order. Requested qubits the program never
    /// touches read 0.
    ///
    /// # Errors
    /// * `QlogicError::InvalidOperation` if `trials` is 0 or `qubits` is empty.
    /// * Any error raised while simulating the program.
    pub fn run_and_measure(&self, program: &Program, qubits: &[u64], trials: usize) -> Result<Vec<Vec<u8>>> {
        if trials == 0 {
            return Err(QlogicError::InvalidOperation { message: "run_and_measure needs at least one trial".to_string() });
        }
        if qubits.is_empty() {
            return Err(QlogicError::InvalidOperation { message: "run_and_measure needs at least one qubit".to_string() });
        }

        let run = self.runs.fetch_add(1, Ordering::Relaxed);
        let span = debug_span!("run_and_measure", run, trials, gates = program.len());
        let _guard = span.enter();

        let measured: Vec<QubitId> = qubits.iter().map(|q| QubitId(*q)).collect();
        let mut tracked = program.qubits().clone();
        tracked.extend(measured.iter().copied());

        let mut engine = SimulationEngine::init(&tracked, self.config.max_qubits)?;
        engine.run(program)?;
        engine.validate_norm()?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run)),
            None => StdRng::from_os_rng(),
        };

        let mut results = Vec::with_capacity(trials);
        for _ in 0..trials {
            let outcome = engine.sample(&mut rng)?;
            let bits = measured.iter().map(|q| engine.bit_of(outcome, *q)).collect::<Result<Vec<u8>>>()?;
            results.push(bits);
        }
        debug!(?results, "measured");
        Ok(results)
    }

    /// Runs `program` and returns its final state without measuring.
    ///
    /// The register spans qubits `0..=max id`, so amplitude index bit `i` is
    /// qubit `i` and qubits the program never touches stay at 0.
    ///
    /// # Errors
    /// * `QlogicError::TooManyQubits` if the highest qubit id does not fit
    ///   under `max_qubits`.
    /// * Any error raised while simulating the program.
    pub fn wavefunction(&self, program: &Program) -> Result<StateVector> {
        let width = program.qubits().iter().next_back().map_or(0, |q| q.0.saturating_add(1));
        let max = self.config.max_qubits;
        if width > max as u64 {
            return Err(QlogicError::TooManyQubits { requested: usize::try_from(width).unwrap_or(usize::MAX), max });
        }
        let register: BTreeSet<QubitId> = (0..width).map(QubitId).collect();

        let mut engine = SimulationEngine::init(&register, max)?;
        engine.run(program)?;
        engine.validate_norm()?;
        debug!(gates = program.len(), qubits = register.len(), "wavefunction computed");
        Ok(engine.state().clone())
    }
}
