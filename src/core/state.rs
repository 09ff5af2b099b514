// src/core/state.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// Amplitudes of an n-qubit register over the `2^n` computational basis states.
///
/// Basis index bit `i` holds the value of the `i`-th tracked qubit (the
/// qubit with the `i`-th smallest id), so index `0b011` on three qubits is
/// the state where the two lowest qubits are 1.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Creates a state from raw amplitudes.
    pub fn new(amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes }
    }

    /// The all-zero basis state `|0...0>` on `dim` amplitudes.
    pub(crate) fn ground(dim: usize) -> Self {
        let mut amplitudes = vec![Complex::zero(); dim];
        if let Some(first) = amplitudes.first_mut() {
            *first = Complex::new(1.0, 0.0);
        }
        Self { amplitudes }
    }

    /// Read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Born-rule probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Sum of squared magnitudes; 1 for a valid state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateVector[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
