// src/circuits/mod.rs

//! Ordered sequences of [`Operation`]s.
//!
//! A `Circuit` is the preparation procedure a grid replays on every shot.
//! It is pure data: building one never touches a simulator.

use crate::core::QubitId;
use crate::operations::{Axis, Operation};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Represents an ordered sequence of Operations applied to a set of qubits.
///
/// Analogy: Similar to `qiskit.QuantumCircuit` without measurements, which
/// are implied at the end of every shot.
#[derive(Clone, PartialEq)] // PartialEq useful for testing circuits
pub struct Circuit {
    /// The unique set of qubits involved across all operations, kept sorted
    /// so diagrams list wires in register order.
    qubits: BTreeSet<QubitId>,

    /// The ordered sequence of operations. Order is significant.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self {
            qubits: BTreeSet::new(),
            operations: Vec::new(),
        }
    }

    /// Adds a single operation to the end of the circuit's sequence.
    ///
    /// The qubits named by `op` are registered with the circuit.
    pub fn add_operation(&mut self, op: Operation) {
        for qubit in op.involved_qubits() {
            self.qubits.insert(qubit);
        }
        self.operations.push(op);
    }

    /// Adds multiple operations from an iterator to the end of the circuit's sequence.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// Returns the set of unique qubits involved in this circuit.
    pub fn qubits(&self) -> &BTreeSet<QubitId> {
        &self.qubits
    }

    /// Returns the ordered operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Highest qubit index mentioned, if any.
    pub fn max_qubit(&self) -> Option<QubitId> {
        self.qubits.iter().next_back().copied()
    }

    /// Returns the total number of operations defined in the circuit.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self { circuit: Circuit::new() }
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Shorthand for [`Operation::Rotate`].
    pub fn rotate(self, target: QubitId, frac: f64, axis: Axis) -> Self {
        self.add_op(Operation::Rotate { target, frac, axis })
    }

    /// Shorthand for [`Operation::ControlledRotate`].
    pub fn controlled_rotate(self, control: QubitId, target: QubitId, frac: f64, axis: Axis) -> Self {
        self.add_op(Operation::ControlledRotate { control, target, frac, axis })
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Gate label: the bare axis for a full turn, `axis^frac` otherwise.
fn gate_symbol(axis: Axis, frac: f64) -> String {
    if (frac - 1.0).abs() < 1e-12 {
        axis.to_string()
    } else {
        let frac = format!("{frac:.3}");
        let frac = frac.trim_end_matches('0').trim_end_matches('.');
        format!("{axis}^{frac}")
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "qgrid::Circuit[0 operations on 0 qubits]");
        }

        let ops = &self.operations;
        let num_ops = ops.len();

        let wires: Vec<QubitId> = self.qubits.iter().copied().collect();
        let num_wires = wires.len();
        let wire_to_row: HashMap<QubitId, usize> = wires.iter().enumerate().map(|(i, q)| (*q, i)).collect();

        let max_label_width = wires.iter().map(|q| q.to_string().len()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2);

        const GATE_WIDTH: usize = 9; // e.g. "─X^0.25──"
        const H_WIRE: char = '─';
        const V_WIRE: char = '│';

        let wire = H_WIRE.to_string().repeat(GATE_WIDTH);
        // op_grid[row][time] holds the gate or wire segment
        let mut op_grid: Vec<Vec<String>> = vec![vec![wire; num_ops]; num_wires];
        // v_connect[row][time] holds the connector drawn below `row`
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_wires];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total = GATE_WIDTH - slen;
                let pre = total / 2;
                let post = total - pre;
                format!("{}{}{}", H_WIRE.to_string().repeat(pre), symbol, H_WIRE.to_string().repeat(post))
            }
        }

        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::Rotate { target, frac, axis } => {
                    if let Some(r) = wire_to_row.get(target) {
                        op_grid[*r][t] = format_gate(&gate_symbol(*axis, *frac));
                    }
                }
                Operation::ControlledRotate { control, target, frac, axis } => {
                    if let (Some(r_ctrl), Some(r_tgt)) = (wire_to_row.get(control), wire_to_row.get(target)) {
                        op_grid[*r_ctrl][t] = format_gate("@");
                        op_grid[*r_tgt][t] = format_gate(&gate_symbol(*axis, *frac));

                        let r_min = (*r_ctrl).min(*r_tgt);
                        let r_max = (*r_ctrl).max(*r_tgt);
                        for row in v_connect.iter_mut().take(r_max).skip(r_min) {
                            row[t] = V_WIRE;
                        }
                    }
                }
            }
        }

        writeln!(f, "qgrid::Circuit[{} operations on {} qubits]", num_ops, num_wires)?;
        for r in 0..num_wires {
            let label = format!("{}: ", wires[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_wires - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let pad = GATE_WIDTH - 1;
                    let pre = pad / 2;
                    write!(f, "{}{}{}", " ".repeat(pre), v_connect[r][t], " ".repeat(pad - pre))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
