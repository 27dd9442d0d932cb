//! Line-based assembler for the okta assembly language.
//!
//! Each non-empty line is `<mnemonic> <operand>* [<immediate>]`. The source
//! is lowercased wholesale before tokenisation, `#` starts a comment that
//! runs to end of line, and tokens are separated by runs of space,
//! horizontal tab, or vertical tab.

use crate::error::{AsmError, BuildError};
use crate::gate::{Gate, QubitId, NUM_QUBITS};
use crate::operation::{Operation, Program};

/// Token separators within a line.
const TOKEN_DELIMS: [char; 3] = [' ', '\t', '\x0B'];

/// Assemble source text into a [`Program`].
///
/// The first failing line stops assembly and records a diagnostic carrying
/// its 1-based physical line number (blank and comment lines count).
pub(crate) fn assemble(source: &str) -> Program {
    let source = source.to_lowercase();

    let mut program = Program {
        operations: Vec::new(),
        active_qubits: Vec::new(),
        error: None,
    };

    for (index, raw_line) in source.split(['\n', '\r']).enumerate() {
        let line = match raw_line.find('#') {
            Some(comment_start) => &raw_line[..comment_start],
            None => raw_line,
        };

        let tokens: Vec<&str> = line
            .split(TOKEN_DELIMS)
            .filter(|token| !token.is_empty())
            .collect();
        if tokens.is_empty() {
            continue;
        }

        if let Err(error) = assemble_line(&tokens, &mut program) {
            program.error = Some(BuildError {
                line: index as u32 + 1,
                error,
            });
            return program;
        }
    }

    program.active_qubits.sort_unstable_by(|a, b| b.cmp(a));
    program
}

/// Assemble one tokenised line into the program.
fn assemble_line(tokens: &[&str], program: &mut Program) -> Result<(), AsmError> {
    let gate = Gate::from_mnemonic(tokens[0])
        .ok_or_else(|| AsmError::UnknownGate(tokens[0].to_string()))?;

    let num_operands = gate.num_operands();
    let expected_tokens = 1 + num_operands + usize::from(gate.has_immediate());
    if tokens.len() != expected_tokens {
        return Err(AsmError::OperandCount {
            gate: tokens[0].to_string(),
            expected: num_operands,
            found: tokens.len() - 1,
        });
    }

    let mut operation = Operation::new(gate);
    for slot in 0..num_operands {
        let token = tokens[slot + 1];
        let operand =
            decode_operand(token).ok_or_else(|| AsmError::InvalidOperand(token.to_string()))?;
        operation.operands[slot] = operand;
        if !program.active_qubits.contains(&operand) {
            program.active_qubits.push(operand);
        }
    }

    for a in 0..num_operands {
        for b in (a + 1)..num_operands {
            if operation.operands[a] == operation.operands[b] {
                return Err(AsmError::DuplicateOperand {
                    first: a + 1,
                    second: b + 1,
                });
            }
        }
    }

    if gate.has_immediate() {
        let token = tokens[num_operands + 1];
        operation.immediate =
            decode_immediate(token).ok_or_else(|| AsmError::InvalidImmediate(token.to_string()))?;
    }

    program.operations.push(operation);
    Ok(())
}

/// Decode a `q<digits>` operand token to a qubit index in [0,7].
fn decode_operand(token: &str) -> Option<QubitId> {
    let digits = token.strip_prefix('q')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index: u32 = digits.parse().ok()?;
    if (index as usize) < NUM_QUBITS {
        Some(QubitId(index as u8))
    } else {
        None
    }
}

/// Decode an immediate token as a finite real number, consuming it fully.
fn decode_immediate(token: &str) -> Option<f64> {
    let value: f64 = token.parse().ok()?;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_operand() {
        assert_eq!(decode_operand("q0"), Some(QubitId(0)));
        assert_eq!(decode_operand("q7"), Some(QubitId(7)));
        assert_eq!(decode_operand("q07"), Some(QubitId(7)));
        assert_eq!(decode_operand("q8"), None);
        assert_eq!(decode_operand("q"), None);
        assert_eq!(decode_operand("x0"), None);
        assert_eq!(decode_operand("q1a"), None);
        assert_eq!(decode_operand("q99999999999999999999"), None);
    }

    #[test]
    fn test_decode_immediate() {
        assert_eq!(decode_immediate("0.5"), Some(0.5));
        assert_eq!(decode_immediate("-3.14"), Some(-3.14));
        assert_eq!(decode_immediate("1e-3"), Some(0.001));
        assert_eq!(decode_immediate("0.1abc"), None);
        assert_eq!(decode_immediate(""), None);
        assert_eq!(decode_immediate("inf"), None);
        assert_eq!(decode_immediate("nan"), None);
    }

    #[test]
    fn test_simple_program() {
        let program = Program::assemble("h q0\ncnot q0 q1\n");
        assert!(program.is_valid());
        assert_eq!(program.operations().len(), 2);
        assert_eq!(program.operations()[0].gate, Gate::Hadamard);
        assert_eq!(program.operations()[1].gate, Gate::Cnot);
        assert_eq!(
            program.operations()[1].operands(),
            &[QubitId(0), QubitId(1)]
        );
        assert_eq!(program.active_qubits(), &[QubitId(1), QubitId(0)]);
    }

    #[test]
    fn test_case_insensitive_and_comments() {
        let program = Program::assemble("  H Q0  # make a superposition\n\n# full-line comment\nX\tq1");
        assert!(program.is_valid());
        assert_eq!(program.operations().len(), 2);
    }

    #[test]
    fn test_immediate_parsing() {
        let program = Program::assemble("rx q0 1.5708");
        assert!(program.is_valid());
        let op = &program.operations()[0];
        assert_eq!(op.gate, Gate::Rx);
        assert!((op.immediate - 1.5708).abs() < 1e-12);
    }

    #[test]
    fn test_comment_inside_token_strips_operand() {
        // '#' anywhere starts a comment, even mid-token: "z #q0" loses its
        // operand and fails the arity check.
        let program = Program::assemble("z #q0");
        assert!(!program.is_valid());
    }

    #[test]
    fn test_first_error_wins_and_line_numbering() {
        let program = Program::assemble("i q0\ni q0\npudding\ni q0");
        assert!(!program.is_valid());
        let message = program.build_error().unwrap().to_string();
        assert!(message.contains("line 3:"), "got: {message}");
        assert!(message.contains("Unknown gate 'pudding'"), "got: {message}");
        // Operations before the failing line were accumulated.
        assert_eq!(program.operations().len(), 2);
    }

    #[test]
    fn test_blank_lines_count_toward_line_numbers() {
        let program = Program::assemble("i q0\n\n\nbad");
        let message = program.build_error().unwrap().to_string();
        assert!(message.contains("line 4:"), "got: {message}");
    }

    #[test]
    fn test_rejections() {
        for source in [
            "i q9",
            "abc q0",
            "i x0",
            "i",
            "i q0 q1",
            "swap q3 q3",
            "rx q0 q1",
            "rz q4 0.1abc",
            "toffoli q0 q1 q0",
            "toffoli q0 q1 q2 q3",
            "z #q0",
        ] {
            let program = Program::assemble(source);
            assert!(!program.is_valid(), "expected rejection for: {source}");
            assert!(program.build_error().is_some());
        }
    }

    #[test]
    fn test_active_qubits_descending() {
        let program = Program::assemble("x q3\nh q1\ncnot q5 q0\ni q1");
        assert!(program.is_valid());
        assert_eq!(
            program.active_qubits(),
            &[QubitId(5), QubitId(3), QubitId(1), QubitId(0)]
        );
    }
}
