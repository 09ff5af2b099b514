// src/simulation/engine.rs
use crate::circuits::Program;
use crate::core::{QlogicError, QubitId, Result, StateVector};
use crate::operations::Gate;
use num_complex::Complex;
use rand::Rng;
use std::collections::{BTreeSet, HashMap};
use std::f64::consts::FRAC_1_SQRT_2;
use tracing::trace;

const NORM_TOLERANCE: f64 = 1e-9;
const AMPLITUDE_TOLERANCE: f64 = 1e-12;

/// Dense state-vector engine over a fixed set of qubits.
///
/// Qubits are mapped to bit positions of the basis index in ascending id
/// order, so sparse ids (e.g. 3, 5, 7) only cost as many bits as there are
/// distinct qubits.
#[derive(Debug)]
pub(crate) struct SimulationEngine {
    /// Maps qubit ids to their bit position (0..N-1) in the basis index.
    qubit_indices: HashMap<QubitId, usize>,
    /// Global state, dimension 2^N.
    state: StateVector,
}

impl SimulationEngine {
    /// Initializes the engine in `|0...0>` for the given qubits.
    pub(crate) fn init(qubits: &BTreeSet<QubitId>, max_qubits: usize) -> Result<Self> {
        let num_qubits = qubits.len();
        if num_qubits > max_qubits {
            return Err(QlogicError::TooManyQubits { requested: num_qubits, max: max_qubits });
        }
        let dim = 1usize.checked_shl(num_qubits as u32).ok_or(QlogicError::TooManyQubits {
            requested: num_qubits,
            max: usize::BITS as usize - 1,
        })?;

        // BTreeSet iteration is sorted, which fixes the bit assignment.
        let qubit_indices = qubits.iter().enumerate().map(|(i, q)| (*q, i)).collect();

        Ok(Self { qubit_indices, state: StateVector::ground(dim) })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<()> {
        if state.dim() != self.state.dim() {
            return Err(QlogicError::InvalidOperation {
                message: format!(
                    "cannot set state: dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            });
        }
        self.state = state;
        Ok(())
    }

    /// Current state.
    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    /// Applies every gate of `program` in order.
    pub(crate) fn run(&mut self, program: &Program) -> Result<()> {
        for gate in program.gates() {
            self.apply_gate(gate)?;
        }
        Ok(())
    }

    /// Applies a single gate to the global state.
    pub(crate) fn apply_gate(&mut self, gate: &Gate) -> Result<()> {
        trace!(%gate, "apply");
        match *gate {
            Gate::I { target } => {
                self.qubit_index(target)?;
            }
            Gate::X { target } => {
                let t = self.qubit_index(target)?;
                self.apply_controlled_flip(&[], t);
            }
            Gate::Z { target } => {
                let t = self.qubit_index(target)?;
                self.apply_single_qubit_gate(t, &[
                    [Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)],
                    [Complex::new(0.0, 0.0), Complex::new(-1.0, 0.0)],
                ]);
            }
            Gate::H { target } => {
                let t = self.qubit_index(target)?;
                self.apply_single_qubit_gate(t, &[
                    [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)],
                    [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)],
                ]);
            }
            Gate::Cnot { control, target } => {
                let (c, t) = (self.qubit_index(control)?, self.qubit_index(target)?);
                Self::check_distinct(gate, &[c, t])?;
                self.apply_controlled_flip(&[c], t);
            }
            Gate::Ccnot { control1, control2, target } => {
                let c1 = self.qubit_index(control1)?;
                let c2 = self.qubit_index(control2)?;
                let t = self.qubit_index(target)?;
                Self::check_distinct(gate, &[c1, c2, t])?;
                self.apply_controlled_flip(&[c1, c2], t);
            }
        }
        Ok(())
    }

    /// Draws one basis index according to the Born rule.
    ///
    /// The state is not collapsed; repeated draws model repeated trials of
    /// the same program.
    pub(crate) fn sample<R: Rng>(&self, rng: &mut R) -> Result<usize> {
        let probabilities = self.state.probabilities();
        let total: f64 = probabilities.iter().sum();
        if total < AMPLITUDE_TOLERANCE {
            return Err(QlogicError::Normalization { norm_sq: format!("{:e}", total) });
        }

        let draw = rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        let mut last_possible = 0;
        for (k, p) in probabilities.iter().enumerate() {
            if *p <= AMPLITUDE_TOLERANCE {
                continue;
            }
            cumulative += p;
            last_possible = k;
            if draw < cumulative {
                return Ok(k);
            }
        }
        // Rounding can leave `draw` just past the final cumulative sum.
        Ok(last_possible)
    }

    /// Value of `qubit` in basis state `outcome`.
    pub(crate) fn bit_of(&self, outcome: usize, qubit: QubitId) -> Result<u8> {
        let idx = self.qubit_index(qubit)?;
        Ok(((outcome >> idx) & 1) as u8)
    }

    /// Checks that the state still has unit norm.
    pub(crate) fn validate_norm(&self) -> Result<()> {
        let norm_sq = self.state.norm_sqr();
        if (norm_sq - 1.0).abs() > NORM_TOLERANCE {
            return Err(QlogicError::Normalization { norm_sq: norm_sq.to_string() });
        }
        Ok(())
    }

    fn qubit_index(&self, qubit: QubitId) -> Result<usize> {
        self.qubit_indices.get(&qubit).copied().ok_or(QlogicError::QubitNotFound(qubit))
    }

    fn check_distinct(gate: &Gate, indices: &[usize]) -> Result<()> {
        for (i, a) in indices.iter().enumerate() {
            if indices[i + 1..].contains(a) {
                return Err(QlogicError::InvalidOperation {
                    message: format!("'{}' acts on the same qubit more than once", gate),
                });
            }
        }
        Ok(())
    }

    /// Applies a 2x2 matrix to the qubit at bit position `target`.
    fn apply_single_qubit_gate(&mut self, target: usize, matrix: &[[Complex<f64>; 2]; 2]) {
        let mask = 1usize << target;
        let amplitudes = self.state.vector_mut();
        for i0 in 0..amplitudes.len() {
            if i0 & mask != 0 {
                continue;
            }
            let i1 = i0 | mask;
            let (psi_0, psi_1) = (amplitudes[i0], amplitudes[i1]);
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// Flips `target` in every basis state where all `controls` are 1.
    /// With no controls this is `X`.
    fn apply_controlled_flip(&mut self, controls: &[usize], target: usize) {
        let control_mask = controls.iter().fold(0usize, |m, c| m | (1 << c));
        let target_mask = 1usize << target;
        let amplitudes = self.state.vector_mut();
        for i in 0..amplitudes.len() {
            if i & control_mask == control_mask && i & target_mask == 0 {
                amplitudes.swap(i, i | target_mask);
            }
        }
    }
}
