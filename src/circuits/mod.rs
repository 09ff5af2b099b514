// src/circuits/mod.rs

//! Defines [`Program`], an ordered, composable sequence of gates.
//!
//! Programs are the fragments the reversible-logic library hands out and the
//! unit the QVM executes. Two programs over the same qubit positions compose
//! by concatenation with `+`, and single gates can be appended with `+=`.

use crate::core::QubitId;
use crate::operations::Gate;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::ops::{Add, AddAssign};

/// An ordered sequence of gates plus the set of qubits they touch.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// Every qubit mentioned by some gate.
    qubits: BTreeSet<QubitId>,

    /// Gates in execution order.
    gates: Vec<Gate>,
}

impl Program {
    /// Creates a new, empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single gate, registering the qubits it touches.
    pub fn add_gate(&mut self, gate: Gate) {
        self.qubits.extend(gate.qubits());
        self.gates.push(gate);
    }

    /// Appends every gate from an iterator.
    pub fn add_gates<I>(&mut self, gates: I)
    where
        I: IntoIterator<Item = Gate>,
    {
        for gate in gates {
            self.add_gate(gate);
        }
    }

    /// Appends a gate and returns `self` for chaining, in the style of
    /// `Program().inst(I(2))`.
    pub fn inst(mut self, gate: Gate) -> Self {
        self.add_gate(gate);
        self
    }

    /// The set of qubits touched by this program, in ascending order.
    pub fn qubits(&self) -> &BTreeSet<QubitId> {
        &self.qubits
    }

    /// The gates in execution order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns `true` if the program contains no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// The inverse program.
    ///
    /// Every gate in the set is its own inverse, so this is the gate
    /// sequence reversed.
    pub fn dagger(&self) -> Self {
        self.gates.iter().rev().copied().collect()
    }

    /// Renders the program as an ASCII wire diagram, one row per qubit.
    pub fn diagram(&self) -> String {
        const GATE_WIDTH: usize = 7;
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        if self.gates.is_empty() {
            return "Program[0 gates on 0 qubits]\n".to_string();
        }

        let rows: Vec<QubitId> = self.qubits.iter().copied().collect();
        let row_of: HashMap<QubitId, usize> = rows.iter().enumerate().map(|(r, q)| (*q, r)).collect();
        let num_gates = self.gates.len();

        let mut grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_gates]; rows.len()];
        let mut connect: Vec<Vec<char>> = vec![vec![' '; num_gates]; rows.len()];

        fn cell(symbol: &str) -> String {
            let len = symbol.chars().count();
            let pre = (GATE_WIDTH - len) / 2;
            let post = GATE_WIDTH - len - pre;
            format!("{}{}{}", H_WIRE.to_string().repeat(pre), symbol, H_WIRE.to_string().repeat(post))
        }

        for (t, gate) in self.gates.iter().enumerate() {
            let qubits = gate.qubits();
            let (target, controls) = match qubits.split_last() {
                Some(split) => split,
                None => continue,
            };
            let symbol = match gate {
                Gate::I { .. } => continue,
                Gate::Z { .. } => "Z",
                Gate::H { .. } => "H",
                _ => "X",
            };
            grid[row_of[target]][t] = cell(symbol);
            for control in controls {
                grid[row_of[control]][t] = cell("@");
            }
            if !controls.is_empty() {
                let touched = qubits.iter().map(|q| row_of[q]);
                let lo = touched.clone().min().unwrap_or(0);
                let hi = touched.max().unwrap_or(0);
                for row in connect.iter_mut().take(hi).skip(lo) {
                    row[t] = V_WIRE;
                }
            }
        }

        let label_width = rows.iter().map(|q| format!("q{}", q).len()).max().unwrap_or(0) + 2;
        let mut out = format!("Program[{} gates on {} qubits]\n", num_gates, rows.len());
        for (r, q) in rows.iter().enumerate() {
            out.push_str(&format!("{:<width$}", format!("q{}: ", q), width = label_width));
            out.push_str(&grid[r].join(""));
            out.push('\n');
            if r + 1 < rows.len() {
                out.push_str(&" ".repeat(label_width));
                for c in &connect[r] {
                    out.push_str(&format!("{:^width$}", c, width = GATE_WIDTH));
                }
                out.push('\n');
            }
        }
        out
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for gate in &self.gates {
            writeln!(f, "{}", gate)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diagram())
    }
}

impl FromIterator<Gate> for Program {
    fn from_iter<I: IntoIterator<Item = Gate>>(iter: I) -> Self {
        let mut program = Program::new();
        program.add_gates(iter);
        program
    }
}

impl Add for Program {
    type Output = Program;

    fn add(mut self, rhs: Program) -> Program {
        self += rhs;
        self
    }
}

impl Add<&Program> for Program {
    type Output = Program;

    fn add(mut self, rhs: &Program) -> Program {
        self.add_gates(rhs.gates.iter().copied());
        self
    }
}

impl Add<Gate> for Program {
    type Output = Program;

    fn add(mut self, rhs: Gate) -> Program {
        self.add_gate(rhs);
        self
    }
}

impl AddAssign for Program {
    fn add_assign(&mut self, rhs: Program) {
        self.add_gates(rhs.gates);
    }
}

impl AddAssign<Gate> for Program {
    fn add_assign(&mut self, rhs: Gate) {
        self.add_gate(rhs);
    }
}

//-------------------------------------------------------------------------
// Program Builder
//-------------------------------------------------------------------------

/// A helper for constructing [`Program`] instances with method chaining.
#[derive(Default)]
pub struct ProgramBuilder {
    program: Program,
}

impl ProgramBuilder {
    /// Creates a new, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single gate.
    pub fn add(mut self, gate: Gate) -> Self {
        self.program.add_gate(gate);
        self
    }

    /// Adds multiple gates from an iterator.
    pub fn add_many<I>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = Gate>,
    {
        self.program.add_gates(gates);
        self
    }

    /// Finalizes the construction process and returns the built `Program`.
    pub fn build(self) -> Program {
        self.program
    }
}
