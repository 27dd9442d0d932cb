//! Assembled operations and the program container.

use serde::{Deserialize, Serialize};

use crate::assembler;
use crate::error::BuildError;
use crate::gate::{Gate, QubitId};

/// One gate application, as assembled from a source line.
///
/// `operands` always has three slots; only the first
/// [`Gate::num_operands`] are meaningful, the rest stay at `q0`.
/// `immediate` is meaningful only for gates with
/// [`Gate::has_immediate`] and stays at `0.0` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The gate to apply.
    pub gate: Gate,
    /// Qubit operands, execution-order slots.
    pub operands: [QubitId; 3],
    /// Rotation angle in radians for `rx`/`ry`/`rz`.
    pub immediate: f64,
}

impl Operation {
    /// Create an operation with all-default operand slots.
    pub(crate) fn new(gate: Gate) -> Self {
        Self {
            gate,
            operands: [QubitId(0); 3],
            immediate: 0.0,
        }
    }

    /// The meaningful operand slots of this operation.
    pub fn operands(&self) -> &[QubitId] {
        &self.operands[..self.gate.num_operands()]
    }
}

/// A validated program: an ordered gate sequence plus the qubits it touches.
///
/// Built once from source text via [`Program::assemble`]. When assembly
/// fails, `operations` holds whatever was accumulated before the failing
/// line and must not be executed.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub(crate) operations: Vec<Operation>,
    pub(crate) active_qubits: Vec<QubitId>,
    pub(crate) error: Option<BuildError>,
}

impl Program {
    /// Assemble a program from source text.
    ///
    /// Never fails outright; check [`Program::is_valid`] and
    /// [`Program::build_error`] for the outcome.
    pub fn assemble(source: &str) -> Self {
        assembler::assemble(source)
    }

    /// Whether every source line assembled cleanly.
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// The first assembly failure, if any.
    pub fn build_error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    /// The assembled operations, in execution order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Every qubit referenced by any operation, sorted descending
    /// (most-significant-first, the row order circuit renderers expect).
    pub fn active_qubits(&self) -> &[QubitId] {
        &self.active_qubits
    }
}
