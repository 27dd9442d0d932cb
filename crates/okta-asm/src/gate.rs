//! Gate kinds and qubit addressing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of qubits in the register.
pub const NUM_QUBITS: usize = 8;

/// Index of a qubit within the 8-qubit register.
///
/// Qubit 0 occupies the most significant bit of a basis-state index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u8);

impl QubitId {
    /// Bit position of this qubit within a basis-state index.
    #[inline]
    pub fn bit(self) -> u32 {
        (NUM_QUBITS as u32 - 1) - u32::from(self.0)
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u8> for QubitId {
    fn from(id: u8) -> Self {
        QubitId(id)
    }
}

/// The closed set of gates the assembly language can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    /// Controlled-NOT gate.
    Cnot,
    /// Identity gate.
    Identity,
    /// Hadamard gate.
    Hadamard,
    /// Pauli-X gate.
    PauliX,
    /// Pauli-Y gate.
    PauliY,
    /// Pauli-Z gate.
    PauliZ,
    /// Rotation around X by the operation's immediate.
    Rx,
    /// Rotation around Y by the operation's immediate.
    Ry,
    /// Rotation around Z by the operation's immediate.
    Rz,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdag,
    /// SWAP gate.
    Swap,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdag,
    /// Toffoli (CCX) gate.
    Toffoli,
}

impl Gate {
    /// Get the assembly mnemonic of this gate.
    #[inline]
    pub fn mnemonic(self) -> &'static str {
        match self {
            Gate::Cnot => "cnot",
            Gate::Identity => "i",
            Gate::Hadamard => "h",
            Gate::PauliX => "x",
            Gate::PauliY => "y",
            Gate::PauliZ => "z",
            Gate::Rx => "rx",
            Gate::Ry => "ry",
            Gate::Rz => "rz",
            Gate::S => "s",
            Gate::Sdag => "sdag",
            Gate::Swap => "swap",
            Gate::T => "t",
            Gate::Tdag => "tdag",
            Gate::Toffoli => "toffoli",
        }
    }

    /// Number of qubit operands this gate takes.
    #[inline]
    pub fn num_operands(self) -> usize {
        match self {
            Gate::Cnot | Gate::Swap => 2,
            Gate::Toffoli => 3,
            _ => 1,
        }
    }

    /// Whether this gate takes a trailing immediate (rotation angle).
    #[inline]
    pub fn has_immediate(self) -> bool {
        matches!(self, Gate::Rx | Gate::Ry | Gate::Rz)
    }

    /// Look up a gate by its assembly mnemonic.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        match mnemonic {
            "cnot" => Some(Gate::Cnot),
            "i" => Some(Gate::Identity),
            "h" => Some(Gate::Hadamard),
            "x" => Some(Gate::PauliX),
            "y" => Some(Gate::PauliY),
            "z" => Some(Gate::PauliZ),
            "rx" => Some(Gate::Rx),
            "ry" => Some(Gate::Ry),
            "rz" => Some(Gate::Rz),
            "s" => Some(Gate::S),
            "sdag" => Some(Gate::Sdag),
            "swap" => Some(Gate::Swap),
            "t" => Some(Gate::T),
            "tdag" => Some(Gate::Tdag),
            "toffoli" => Some(Gate::Toffoli),
            _ => None,
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnemonic_lookup_roundtrip() {
        for gate in [
            Gate::Cnot,
            Gate::Identity,
            Gate::Hadamard,
            Gate::PauliX,
            Gate::PauliY,
            Gate::PauliZ,
            Gate::Rx,
            Gate::Ry,
            Gate::Rz,
            Gate::S,
            Gate::Sdag,
            Gate::Swap,
            Gate::T,
            Gate::Tdag,
            Gate::Toffoli,
        ] {
            assert_eq!(Gate::from_mnemonic(gate.mnemonic()), Some(gate));
        }
        assert_eq!(Gate::from_mnemonic("abc"), None);
    }

    #[test]
    fn test_arities() {
        assert_eq!(Gate::Hadamard.num_operands(), 1);
        assert_eq!(Gate::Cnot.num_operands(), 2);
        assert_eq!(Gate::Swap.num_operands(), 2);
        assert_eq!(Gate::Toffoli.num_operands(), 3);
        assert!(Gate::Rx.has_immediate());
        assert!(Gate::Ry.has_immediate());
        assert!(Gate::Rz.has_immediate());
        assert!(!Gate::Hadamard.has_immediate());
    }

    #[test]
    fn test_qubit_display_and_bit() {
        assert_eq!(format!("{}", QubitId(3)), "q3");
        assert_eq!(QubitId(0).bit(), 7);
        assert_eq!(QubitId(7).bit(), 0);
    }
}
