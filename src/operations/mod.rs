// src/operations/mod.rs

//! Defines the gate set programs are built from.
//!
//! Reversible classical logic only needs bit flips with zero, one or two
//! controls (`X`, `CNOT`, `CCNOT`). `I` is kept as an explicit no-op so a
//! state-preparation fragment is never empty, and `Z`/`H` let programs
//! leave the computational basis when exercising the QVM's sampling.

use crate::core::QubitId;
use std::fmt;

/// A single gate acting on one to three qubits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Identity; leaves the state unchanged.
    I {
        /// The wire the no-op is attached to.
        target: QubitId,
    },
    /// Bit flip (Pauli X).
    X {
        /// The flipped wire.
        target: QubitId,
    },
    /// Phase flip (Pauli Z).
    Z {
        /// The wire receiving the phase.
        target: QubitId,
    },
    /// Hadamard.
    H {
        /// The wire being rotated.
        target: QubitId,
    },
    /// Controlled NOT: flips `target` when `control` is 1.
    Cnot {
        /// The control wire.
        control: QubitId,
        /// The flipped wire.
        target: QubitId,
    },
    /// Toffoli: flips `target` when both controls are 1.
    Ccnot {
        /// First control wire.
        control1: QubitId,
        /// Second control wire.
        control2: QubitId,
        /// The flipped wire.
        target: QubitId,
    },
}

impl Gate {
    /// `I` on qubit `q`.
    pub fn identity(q: u64) -> Self {
        Gate::I { target: QubitId(q) }
    }

    /// `X` on qubit `q`.
    pub fn x(q: u64) -> Self {
        Gate::X { target: QubitId(q) }
    }

    /// `Z` on qubit `q`.
    pub fn z(q: u64) -> Self {
        Gate::Z { target: QubitId(q) }
    }

    /// `H` on qubit `q`.
    pub fn h(q: u64) -> Self {
        Gate::H { target: QubitId(q) }
    }

    /// `CNOT control target`.
    pub fn cnot(control: u64, target: u64) -> Self {
        Gate::Cnot { control: QubitId(control), target: QubitId(target) }
    }

    /// `CCNOT control1 control2 target`.
    pub fn ccnot(control1: u64, control2: u64, target: u64) -> Self {
        Gate::Ccnot {
            control1: QubitId(control1),
            control2: QubitId(control2),
            target: QubitId(target),
        }
    }

    /// Every qubit the gate touches, controls first.
    pub fn qubits(&self) -> Vec<QubitId> {
        match *self {
            Gate::I { target } | Gate::X { target } | Gate::Z { target } | Gate::H { target } => {
                vec![target]
            }
            Gate::Cnot { control, target } => vec![control, target],
            Gate::Ccnot { control1, control2, target } => vec![control1, control2, target],
        }
    }

    /// The Quil mnemonic.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::I { .. } => "I",
            Gate::X { .. } => "X",
            Gate::Z { .. } => "Z",
            Gate::H { .. } => "H",
            Gate::Cnot { .. } => "CNOT",
            Gate::Ccnot { .. } => "CCNOT",
        }
    }

    /// True if the gate maps computational basis states to basis states.
    pub fn is_classical(&self) -> bool {
        !matches!(self, Gate::H { .. })
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        for q in self.qubits() {
            write!(f, " {}", q)?;
        }
        Ok(())
    }
}
