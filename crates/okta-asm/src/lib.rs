//! Assembler for the okta quantum assembly language.
//!
//! This crate turns source text into a validated [`Program`]: an ordered
//! sequence of gate [`Operation`]s over a fixed 8-qubit register, plus the
//! set of qubits the program touches. The companion `okta-sim` crate
//! executes assembled programs.
//!
//! # Language
//!
//! One operation per line, case-insensitive, `#` comments:
//!
//! | mnemonic | gate | operands | immediate |
//! |----------|------|----------|-----------|
//! | `cnot` | controlled-NOT | 2 | — |
//! | `i` | identity | 1 | — |
//! | `h` | Hadamard | 1 | — |
//! | `x`, `y`, `z` | Pauli gates | 1 | — |
//! | `rx`, `ry`, `rz` | rotations | 1 | angle (radians) |
//! | `s`, `sdag` | phase gates | 1 | — |
//! | `t`, `tdag` | π/8 gates | 1 | — |
//! | `swap` | SWAP | 2 | — |
//! | `toffoli` | Toffoli (CCX) | 3 | — |
//!
//! Operands are `q0` through `q7`. Qubit 0 is the most significant bit of
//! a basis-state index.
//!
//! # Example
//!
//! ```rust
//! use okta_asm::{Gate, Program, QubitId};
//!
//! let program = Program::assemble("h q0\ncnot q0 q1");
//! assert!(program.is_valid());
//! assert_eq!(program.operations().len(), 2);
//! assert_eq!(program.operations()[0].gate, Gate::Hadamard);
//! // Active qubits are reported most-significant-first.
//! assert_eq!(program.active_qubits(), &[QubitId(1), QubitId(0)]);
//! ```
//!
//! Assembly never panics; a bad line flags the program invalid with a
//! single diagnostic carrying its 1-based line number:
//!
//! ```rust
//! use okta_asm::Program;
//!
//! let program = Program::assemble("h q0\nfrobnicate q1");
//! assert!(!program.is_valid());
//! let message = program.build_error().unwrap().to_string();
//! assert_eq!(message, "Error on line 2: Unknown gate 'frobnicate'");
//! ```

mod assembler;
mod emitter;
mod error;
mod gate;
mod operation;

pub use emitter::emit;
pub use error::{AsmError, BuildError};
pub use gate::{Gate, QubitId, NUM_QUBITS};
pub use operation::{Operation, Program};

/// Dimension of the dense state vector (2^[`NUM_QUBITS`]).
pub const STATE_VEC_SIZE: usize = 1 << NUM_QUBITS;
