//! Dense statevector simulator for the okta 8-qubit register.
//!
//! Executes assembled [`okta_asm::Program`]s against a 256-entry complex
//! state vector. Every gate is lifted to the full space by Kronecker
//! products of 2x2 factors and applied with a row-vector multiply; two- and
//! three-qubit gates are built from projector sums and the standard
//! Clifford+T Toffoli decomposition.
//!
//! The engine exposes two observable surfaces after execution: the
//! amplitude snapshot ([`Simulator::amplitudes`]) and the sampled shot
//! histogram ([`Simulator::results`]).
//!
//! # Example
//!
//! ```rust
//! use okta_asm::Program;
//! use okta_sim::Simulator;
//!
//! let program = Program::assemble("h q0\ncnot q0 q1");
//! assert!(program.is_valid());
//!
//! let mut simulator = Simulator::with_seed(42);
//! simulator.bind_program(&program);
//! simulator.run(1000);
//!
//! // Bell pair: only |00000000⟩ and |11000000⟩ survive.
//! let states: Vec<u8> = simulator.amplitudes().iter().map(|a| a.state).collect();
//! assert_eq!(states, vec![0b0000_0000, 0b1100_0000]);
//!
//! let shots: u32 = simulator.results().iter().map(|o| o.count).sum();
//! assert_eq!(shots, 1000);
//! ```

mod engine;
mod matrices;
mod tensor;

pub use engine::{Amplitude, Outcome, Simulator};
