// src/verify/mod.rs

//! Truth-table verification of reversible circuits.
//!
//! A circuit over `width` qubits realises a boolean function on `width`-bit
//! strings. [`verify`] checks that function exhaustively: for every input
//! it prepares the matching basis state, runs the circuit once on the QVM,
//! and compares the single measured string with the table.

use crate::circuits::Program;
use crate::core::{BitString, QlogicError, Result};
use crate::operations::Gate;
use crate::vm::QvmConnection;
use std::collections::BTreeMap;
use tracing::{debug, info_span, warn};

/// A mapping from `width`-bit inputs to `width`-bit outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    width: usize,
    entries: BTreeMap<BitString, BitString>,
}

impl TruthTable {
    /// An empty table for `width`-bit strings.
    pub fn new(width: usize) -> Self {
        Self { width, entries: BTreeMap::new() }
    }

    /// Builds a three-bit table from tuple literals.
    ///
    /// ```
    /// # use qlogic::TruthTable;
    /// let not_last = TruthTable::from_triples(&[
    ///     ((0, 0, 0), (0, 0, 1)),
    ///     ((0, 0, 1), (0, 0, 0)),
    /// ]).unwrap();
    /// assert_eq!(not_last.len(), 2);
    /// ```
    pub fn from_triples(entries: &[((u8, u8, u8), (u8, u8, u8))]) -> Result<Self> {
        let mut table = Self::new(3);
        for (input, output) in entries {
            table.insert(BitString::try_from(*input)?, BitString::try_from(*output)?)?;
        }
        Ok(table)
    }

    /// Builds the complete table of `f` over every `width`-bit input.
    pub fn from_fn<F>(width: usize, f: F) -> Result<Self>
    where
        F: Fn(&BitString) -> BitString,
    {
        let mut table = Self::new(width);
        for input in BitString::all(width) {
            let output = f(&input);
            table.insert(input, output)?;
        }
        Ok(table)
    }

    /// Adds an entry.
    ///
    /// # Errors
    /// * `QlogicError::WidthMismatch` if either string is not `width` bits.
    /// * `QlogicError::DuplicateEntry` if `input` is already present.
    pub fn insert(&mut self, input: BitString, output: BitString) -> Result<()> {
        for bits in [&input, &output] {
            if bits.width() != self.width {
                return Err(QlogicError::WidthMismatch { expected: self.width, actual: bits.width() });
            }
        }
        if self.entries.contains_key(&input) {
            return Err(QlogicError::DuplicateEntry { input });
        }
        self.entries.insert(input, output);
        Ok(())
    }

    /// The output recorded for `input`.
    pub fn get(&self, input: &BitString) -> Option<&BitString> {
        self.entries.get(input)
    }

    /// Entries in ascending input order.
    pub fn iter(&self) -> impl Iterator<Item = (&BitString, &BitString)> {
        self.entries.iter()
    }

    /// Bit width of inputs and outputs.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if every `width`-bit input has an entry.
    pub fn is_complete(&self) -> bool {
        BitString::space_size(self.width) == Some(self.entries.len())
    }

    /// Returns `true` if the table is complete and no two inputs share an
    /// output, i.e. it describes a permutation of the input space.
    pub fn is_reversible(&self) -> bool {
        let mut outputs: Vec<&BitString> = self.entries.values().collect();
        outputs.sort();
        outputs.dedup();
        self.is_complete() && outputs.len() == self.entries.len()
    }

    /// Functional composition: the table of "apply `self`, then `next`".
    ///
    /// # Errors
    /// * `QlogicError::WidthMismatch` if the widths differ.
    /// * `QlogicError::MissingEntry` if an output of `self` has no entry in `next`.
    pub fn compose(&self, next: &TruthTable) -> Result<TruthTable> {
        if self.width != next.width {
            return Err(QlogicError::WidthMismatch { expected: self.width, actual: next.width });
        }
        let mut composed = TruthTable::new(self.width);
        for (input, middle) in &self.entries {
            let output = next.get(middle).ok_or_else(|| QlogicError::MissingEntry { input: middle.clone() })?;
            composed.insert(input.clone(), output.clone())?;
        }
        Ok(composed)
    }

    fn ensure_complete(&self) -> Result<()> {
        let expected = BitString::space_size(self.width).ok_or(QlogicError::TooManyQubits {
            requested: self.width,
            max: usize::BITS as usize - 1,
        })?;
        if self.entries.len() == expected {
            Ok(())
        } else {
            Err(QlogicError::IncompleteTable { width: self.width, expected, actual: self.entries.len() })
        }
    }
}

/// Program preparing the basis state labelled by `input`.
///
/// Starts with an identity on the last position so the fragment is never
/// empty and always spans the full register, then flips every position
/// holding a 1.
pub fn state_preparation(input: &BitString) -> Program {
    let mut program = Program::new();
    if let Some(last) = input.width().checked_sub(1) {
        program += Gate::identity(last as u64);
    }
    for position in input.ones() {
        program += Gate::x(position as u64);
    }
    program
}

/// Checks `circuit` against every entry of `table` at trial count 1.
///
/// Qubits `0..width` carry the input and are measured as the output.
/// Verification stops at the first failing entry.
///
/// # Errors
/// * `QlogicError::WidthMismatch` if `table` is not `width` bits wide.
/// * `QlogicError::IncompleteTable` if `table` does not list all `2^width` inputs.
/// * `QlogicError::Mismatch` naming the first input whose output differs.
/// * Any error from the QVM, unmodified.
pub fn verify(qvm: &QvmConnection, circuit: &Program, table: &TruthTable, width: usize) -> Result<()> {
    if table.width() != width {
        return Err(QlogicError::WidthMismatch { expected: width, actual: table.width() });
    }
    table.ensure_complete()?;

    let span = info_span!("verify", width, entries = table.len());
    let _guard = span.enter();
    if !circuit.gates().iter().all(Gate::is_classical) {
        warn!("circuit is not classical, each entry sees a single random sample");
    }
    let qubits: Vec<u64> = (0..width as u64).collect();

    for (input, expected) in table.iter() {
        let observed = measure_once(qvm, circuit, input, &qubits)?;
        debug!(%input, %expected, %observed, "checked entry");
        if &observed != expected {
            warn!(%input, %expected, %observed, "truth table mismatch");
            return Err(QlogicError::Mismatch { input: input.clone(), expected: expected.clone(), observed });
        }
    }
    Ok(())
}

/// Runs `circuit` on every `width`-bit input and records what it produces.
pub fn observe_truth_table(qvm: &QvmConnection, circuit: &Program, width: usize) -> Result<TruthTable> {
    let qubits: Vec<u64> = (0..width as u64).collect();
    let mut table = TruthTable::new(width);
    for input in BitString::all(width) {
        let observed = measure_once(qvm, circuit, &input, &qubits)?;
        table.insert(input, observed)?;
    }
    Ok(table)
}

fn measure_once(qvm: &QvmConnection, circuit: &Program, input: &BitString, qubits: &[u64]) -> Result<BitString> {
    let program = state_preparation(input) + circuit;
    let mut trials = qvm.run_and_measure(&program, qubits, 1)?;
    let bits = trials.pop().ok_or_else(|| QlogicError::InvalidOperation {
        message: "QVM returned no trials".to_string(),
    })?;
    BitString::try_from(bits)
}
