//! Emitter for serializing programs back to assembly text.

use std::fmt::Write as _;

use crate::operation::{Operation, Program};

/// Emit a program as canonical assembly source.
///
/// One operation per line, mnemonic first, then operands, then the
/// immediate for rotation gates. Emitted text reassembles to an equal
/// program.
pub fn emit(program: &Program) -> String {
    let mut output = String::new();
    for operation in program.operations() {
        emit_operation(&mut output, operation);
    }
    output
}

fn emit_operation(output: &mut String, operation: &Operation) {
    output.push_str(operation.gate.mnemonic());
    for operand in operation.operands() {
        // Display renders q<n>; writing to a String cannot fail.
        let _ = write!(output, " {operand}");
    }
    if operation.gate.has_immediate() {
        let _ = write!(output, " {}", operation.immediate);
    }
    output.push('\n');
}
