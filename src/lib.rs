// src/lib.rs

//! `qlogic` - Reversible classical logic on a quantum virtual machine
//!
//! This library builds reversible logic primitives (the majority and
//! unmajority-and-add gates of the Cuccaro adder) as quantum programs, runs
//! them on a state-vector QVM, and verifies them exhaustively against truth
//! tables.

pub mod circuits;
pub mod core;
pub mod operations;
pub mod reversible;
pub mod simulation;
pub mod verify;
pub mod vm;

// Re-export the most common types for easier top-level use
pub use crate::circuits::{Program, ProgramBuilder};
pub use crate::core::{BitString, QlogicError, QubitId, Result, StateVector};
pub use crate::operations::Gate;
pub use crate::reversible::{majority_gate, ripple_carry_adder, unmajority_add_gate, unmajority_add_parallel_gate};
pub use crate::simulation::Simulator;
pub use crate::verify::{TruthTable, observe_truth_table, state_preparation, verify};
pub use crate::vm::{QvmConfig, QvmConnection};

// Example 1: Majority gate truth table
// Verifies the majority gate over all eight three-bit inputs.
/// ```
/// use qlogic::{majority_gate, verify, QvmConnection, TruthTable, QlogicError};
///
/// let qvm = QvmConnection::new();
/// let table = TruthTable::from_triples(&[
///     ((0, 0, 0), (0, 0, 0)),
///     ((0, 0, 1), (1, 1, 0)),
///     ((0, 1, 0), (0, 1, 0)),
///     ((0, 1, 1), (1, 0, 1)),
///     ((1, 0, 0), (1, 0, 0)),
///     ((1, 0, 1), (0, 1, 1)),
///     ((1, 1, 0), (1, 1, 1)),
///     ((1, 1, 1), (0, 0, 1)),
/// ])?;
///
/// verify(&qvm, &majority_gate(0, 1, 2), &table, 3)?;
/// # Ok::<(), QlogicError>(())
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: Two-bit addition
// Adds a = 3 and b = 1 with the ripple-carry adder and reads the sum and carry.
/// ```
/// use qlogic::{ripple_carry_adder, Gate, Program, QvmConnection, QlogicError};
///
/// // a on qubits 0-1, b on 2-3, carry in on 4, carry out on 5 (LSB first)
/// let adder = ripple_carry_adder(&[0, 1], &[2, 3], 4, 5)?;
/// let prep = Program::new()
///     .inst(Gate::x(0))
///     .inst(Gate::x(1))
///     .inst(Gate::x(2));
///
/// let qvm = QvmConnection::new();
/// let result = qvm.run_and_measure(&(prep + adder), &[2, 3, 5], 1)?;
/// // 3 + 1 = 4: sum bits 00, carry 1
/// assert_eq!(result[0], vec![0, 0, 1]);
/// # Ok::<(), QlogicError>(())
/// ```
#[doc(hidden)]
const _: () = ();
