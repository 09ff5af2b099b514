//! Error handling logic

use super::bits::BitString;
use std::fmt;

/// Identifier for a qubit wire. The wrapped value is the qubit's position,
/// so `QubitId(2)` is the third wire of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub u64);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for QubitId {
    fn from(index: u64) -> Self {
        QubitId(index)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QlogicError>;

/// Failures raised while building programs, running them on the QVM,
/// or checking them against a truth table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QlogicError {
    /// The observed output of a circuit differs from the table entry.
    #[error("truth table mismatch for input {input}: expected {expected}, observed {observed}")]
    Mismatch {
        /// The prepared input state.
        input: BitString,
        /// The table's output for `input`.
        expected: BitString,
        /// What the QVM measured.
        observed: BitString,
    },

    /// A table handed to the verifier does not enumerate every input.
    #[error("truth table of width {width} has {actual} entries, expected {expected}")]
    IncompleteTable {
        /// Bit width of the table.
        width: usize,
        /// Number of entries required (`2^width`).
        expected: usize,
        /// Number of entries present.
        actual: usize,
    },

    /// A bit string's length disagrees with the width it is used at.
    #[error("width mismatch: expected {expected} bits, got {actual}")]
    WidthMismatch {
        /// Width required by the context.
        expected: usize,
        /// Width supplied.
        actual: usize,
    },

    /// The same input appears twice in a truth table.
    #[error("duplicate truth table entry for input {input}")]
    DuplicateEntry {
        /// The repeated key.
        input: BitString,
    },

    /// A table lookup found no entry for the given input.
    #[error("no truth table entry for input {input}")]
    MissingEntry {
        /// The missing key.
        input: BitString,
    },

    /// A bit value other than 0 or 1 was supplied.
    #[error("invalid bit value {value} at position {position}")]
    InvalidBit {
        /// Offending position.
        position: usize,
        /// Offending value.
        value: u8,
    },

    /// An operation is inconsistent with the program or the QVM state.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Failure message
        message: String,
    },

    /// A qubit was referenced that the simulation does not track.
    #[error("qubit {0} not found in simulation context")]
    QubitNotFound(QubitId),

    /// The program needs more qubits than the QVM is configured to hold.
    #[error("program uses {requested} qubits, QVM limit is {max}")]
    TooManyQubits {
        /// Qubits the program would need.
        requested: usize,
        /// Configured limit.
        max: usize,
    },

    /// The state vector drifted away from unit norm.
    #[error("state vector norm deviated from 1: {norm_sq}")]
    Normalization {
        /// Squared norm, formatted.
        norm_sq: String,
    },

    /// A configuration value could not be parsed.
    #[error("configuration error: {message}")]
    Config {
        /// Failure message
        message: String,
    },
}
