// src/reversible/mod.rs

//! Reversible classical logic primitives built from `X`, `CNOT` and `CCNOT`.
//!
//! The majority (MAJ) and unmajority-and-add (UMA) gates are the building
//! blocks of the Cuccaro ripple-carry adder (quant-ph/0410184). Each takes
//! three qubit positions and returns a [`Program`] fragment that can be
//! concatenated with other fragments over the same positions.

use crate::circuits::Program;
use crate::core::{QlogicError, Result};
use crate::operations::Gate;
use std::collections::HashSet;

/// The majority gate.
///
/// ```text
/// a ───────X───@─── a ⊕ c
///          │   │
/// b ───X───┼───@─── b ⊕ c
///      │   │   │
/// c ───@───@───X─── MAJ(a, b, c)
/// ```
///
/// Leaves the majority of the three input bits on `c`.
pub fn majority_gate(a: u64, b: u64, c: u64) -> Program {
    Program::new()
        .inst(Gate::cnot(c, b))
        .inst(Gate::cnot(c, a))
        .inst(Gate::ccnot(a, b, c))
}

/// The two-CNOT unmajority-and-add gate.
///
/// Run after [`majority_gate`] on the same positions it restores `c`, then
/// leaves `a ⊕ b ⊕ c` (the sum bit) on `b`.
pub fn unmajority_add_gate(a: u64, b: u64, c: u64) -> Program {
    Program::new()
        .inst(Gate::ccnot(a, b, c))
        .inst(Gate::cnot(c, a))
        .inst(Gate::cnot(a, b))
}

/// The three-CNOT unmajority-and-add gate.
///
/// Realises the same map as [`unmajority_add_gate`], but its middle CNOTs
/// can be scheduled in parallel with neighbouring gates in an adder.
pub fn unmajority_add_parallel_gate(a: u64, b: u64, c: u64) -> Program {
    Program::new()
        .inst(Gate::x(b))
        .inst(Gate::cnot(a, b))
        .inst(Gate::ccnot(a, b, c))
        .inst(Gate::x(b))
        .inst(Gate::cnot(c, a))
        .inst(Gate::cnot(c, b))
}

/// Cuccaro ripple-carry adder.
///
/// Registers are given least significant qubit first. After the program:
/// `register_a` and `carry_in` hold their inputs, `register_b` holds
/// `a + b + carry_in` modulo `2^n`, and `carry_out` has been XORed with the
/// carry out of the top bit.
///
/// # Errors
/// Returns `QlogicError::InvalidOperation` if the registers are empty, have
/// different lengths, or share a qubit with each other or the carries.
pub fn ripple_carry_adder(
    register_a: &[u64],
    register_b: &[u64],
    carry_in: u64,
    carry_out: u64,
) -> Result<Program> {
    if register_a.is_empty() || register_a.len() != register_b.len() {
        return Err(QlogicError::InvalidOperation {
            message: format!(
                "adder registers must be non-empty and of equal length, got {} and {}",
                register_a.len(),
                register_b.len()
            ),
        });
    }
    let mut seen = HashSet::new();
    let all = register_a.iter().chain(register_b).chain([&carry_in, &carry_out]);
    for q in all {
        if !seen.insert(*q) {
            return Err(QlogicError::InvalidOperation {
                message: format!("qubit {} used more than once in adder layout", q),
            });
        }
    }

    let n = register_a.len();
    // The carry into bit i lives on `carry_in` for i == 0, then on a[i-1].
    let carry = |i: usize| if i == 0 { carry_in } else { register_a[i - 1] };

    let mut program = Program::new();
    for i in 0..n {
        program += majority_gate(carry(i), register_b[i], register_a[i]);
    }
    program += Gate::cnot(register_a[n - 1], carry_out);
    for i in (0..n).rev() {
        program += unmajority_add_gate(carry(i), register_b[i], register_a[i]);
    }
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_gate_sequence() {
        assert_eq!(
            majority_gate(0, 1, 2).gates(),
            &[Gate::cnot(2, 1), Gate::cnot(2, 0), Gate::ccnot(0, 1, 2)]
        );
    }

    #[test]
    fn test_fragments_stay_on_their_positions() {
        let fragment = majority_gate(3, 5, 7) + unmajority_add_parallel_gate(3, 5, 7);
        let qubits: Vec<u64> = fragment.qubits().iter().map(|q| q.0).collect();
        assert_eq!(qubits, vec![3, 5, 7]);
    }

    #[test]
    fn test_adder_gate_count() -> Result<()> {
        // n MAJ + 1 CNOT + n UMA, three gates per MAJ/UMA
        let adder = ripple_carry_adder(&[0, 1, 2], &[3, 4, 5], 6, 7)?;
        assert_eq!(adder.len(), 3 * 3 + 1 + 3 * 3);
        Ok(())
    }

    #[test]
    fn test_adder_rejects_bad_layouts() {
        assert!(ripple_carry_adder(&[], &[], 0, 1).is_err());
        assert!(ripple_carry_adder(&[0, 1], &[2], 3, 4).is_err());
        assert!(ripple_carry_adder(&[0], &[0], 1, 2).is_err());
        assert!(ripple_carry_adder(&[0], &[1], 2, 2).is_err());
    }
}
