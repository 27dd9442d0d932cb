//! The simulator engine: state vector, program cursor, and sampling.

use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use okta_asm::{Gate, Operation, Program, QubitId, NUM_QUBITS, STATE_VEC_SIZE};

use crate::matrices::{self, Mat2};
use crate::tensor::{vec_mat_mul, Matrix};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A nonzero entry of the state vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Amplitude {
    /// Basis-state index. Qubit 0 occupies the most significant bit.
    pub state: u8,
    /// Complex coefficient of that basis state.
    pub amplitude: Complex64,
}

/// One bucket of the sampled-measurement histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Basis-state index.
    pub state: u8,
    /// Number of shots that landed on this state.
    pub count: u32,
}

/// Dense statevector simulator over the fixed 8-qubit register.
///
/// The engine borrows the bound [`Program`] for the duration of the bind
/// and owns everything else: the 256-entry state vector, the cursor to the
/// next operation, the PRNG used for sampling, and the histogram from the
/// most recent run. Single-threaded, synchronous; gate operators are
/// rebuilt from scratch on every step.
pub struct Simulator<'p> {
    rng: StdRng,
    program: Option<&'p Program>,
    next_gate_index: usize,
    state: Vec<Complex64>,
    results: Vec<Outcome>,
}

impl<'p> Simulator<'p> {
    /// Create a simulator with an OS-seeded PRNG.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a simulator with a fixed PRNG seed, for reproducible sampling.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        let mut simulator = Self {
            rng,
            program: None,
            next_gate_index: 0,
            state: vec![ZERO; STATE_VEC_SIZE],
            results: Vec::new(),
        };
        simulator.reset();
        simulator
    }

    /// Bind a program and reset the register.
    pub fn bind_program(&mut self, program: &'p Program) {
        debug!(operations = program.operations().len(), "binding program");
        self.program = Some(program);
        self.reset();
    }

    /// Return the register to |00000000⟩ and the cursor to the first
    /// operation. The results histogram is left untouched.
    pub fn reset(&mut self) {
        self.next_gate_index = 0;
        self.state.fill(ZERO);
        self.state[0] = ONE;
    }

    /// Execute the operation at the cursor, if any, and advance.
    ///
    /// With `single_step`, consuming the last operation also records a
    /// one-shot measurement into the results histogram. Without a bound
    /// program, or with the cursor already at the end, this is a no-op.
    pub fn step(&mut self, single_step: bool) {
        let Some(program) = self.program else {
            return;
        };
        let operations = program.operations();
        if self.next_gate_index >= operations.len() {
            return;
        }

        let operation = operations[self.next_gate_index];
        self.execute(&operation);
        self.next_gate_index += 1;

        if single_step && self.next_gate_index == operations.len() {
            self.generate_results(1);
        }
    }

    /// Reset, execute the whole bound program, and sample `num_runs` shots
    /// from the final distribution. A no-op without a bound program.
    pub fn run(&mut self, num_runs: u32) {
        let Some(program) = self.program else {
            return;
        };
        debug!(
            operations = program.operations().len(),
            num_runs, "starting run"
        );

        self.reset();
        while self.next_gate_index < program.operations().len() {
            self.step(false);
        }
        self.generate_results(num_runs);
    }

    /// The nonzero state-vector entries, in ascending state order.
    pub fn amplitudes(&self) -> Vec<Amplitude> {
        self.state
            .iter()
            .enumerate()
            .filter(|(_, amplitude)| amplitude.norm() != 0.0)
            .map(|(index, amplitude)| Amplitude {
                state: index as u8,
                amplitude: *amplitude,
            })
            .collect()
    }

    /// The histogram from the most recent run or final single step.
    pub fn results(&self) -> &[Outcome] {
        &self.results
    }

    /// Index of the next operation to execute; equals the operation count
    /// once the program has fully executed.
    pub fn next_gate_index(&self) -> usize {
        self.next_gate_index
    }

    /// Visualisation readout (α, β) for one qubit.
    ///
    /// Sums squares in the complex field (not |·|²) over the halves of the
    /// register where the qubit reads 0 or 1, then takes principal complex
    /// roots. Not a Bloch-sphere decomposition; consumers render it as-is.
    pub fn qubit_state(&self, qubit: QubitId) -> [Complex64; 2] {
        let bit = qubit.bit();
        let mut zero_sum = ZERO;
        let mut one_sum = ZERO;
        for (index, amplitude) in self.state.iter().enumerate() {
            if (index >> bit) & 1 == 1 {
                one_sum += amplitude * amplitude;
            } else {
                zero_sum += amplitude * amplitude;
            }
        }
        [zero_sum.sqrt(), one_sum.sqrt()]
    }

    /// Apply one operation to the state vector.
    fn execute(&mut self, operation: &Operation) {
        let q = operation.operands;
        match operation.gate {
            Gate::Cnot => self.apply_cnot(q[0], q[1]),
            Gate::Identity => self.apply_single(matrices::IDENTITY, q[0]),
            Gate::Hadamard => self.apply_single(matrices::HADAMARD, q[0]),
            Gate::PauliX => self.apply_single(matrices::PAULI_X, q[0]),
            Gate::PauliY => self.apply_single(matrices::PAULI_Y, q[0]),
            Gate::PauliZ => self.apply_single(matrices::PAULI_Z, q[0]),
            Gate::Rx => self.apply_single(matrices::rx(operation.immediate), q[0]),
            Gate::Ry => self.apply_single(matrices::ry(operation.immediate), q[0]),
            Gate::Rz => self.apply_single(matrices::rz(operation.immediate), q[0]),
            Gate::S => self.apply_single(matrices::S_GATE, q[0]),
            Gate::Sdag => self.apply_single(matrices::S_DAGGER, q[0]),
            Gate::Swap => {
                // SWAP(a, b) = CNOT(a, b) · CNOT(b, a) · CNOT(a, b).
                self.apply_cnot(q[0], q[1]);
                self.apply_cnot(q[1], q[0]);
                self.apply_cnot(q[0], q[1]);
            }
            Gate::T => self.apply_single(matrices::T_GATE, q[0]),
            Gate::Tdag => self.apply_single(matrices::T_DAGGER, q[0]),
            Gate::Toffoli => self.apply_toffoli(q[0], q[1], q[2]),
        }
    }

    /// Lift a 2x2 gate to the full register and apply it.
    ///
    /// Composition runs from qubit 7 up to qubit 0, so the factor for
    /// qubit 0 ends up leftmost, matching the qubit-0-is-MSB index layout.
    fn apply_single(&mut self, gate: Mat2, qubit: QubitId) {
        let target = qubit.0 as usize;

        let factor = |index: usize| {
            Matrix::from_2x2(if index == target {
                gate
            } else {
                matrices::IDENTITY
            })
        };

        let mut operator = factor(NUM_QUBITS - 1);
        for index in (0..NUM_QUBITS - 1).rev() {
            operator = factor(index).kron(&operator);
        }

        self.state = vec_mat_mul(&self.state, &operator);
    }

    /// Build and apply the CNOT operator for an arbitrary control/target
    /// pair as the sum of two projected tensor chains:
    /// |0⟩⟨0| at the control with identities elsewhere, plus |1⟩⟨1| at the
    /// control with X at the target.
    fn apply_cnot(&mut self, control: QubitId, target: QubitId) {
        let control = control.0 as usize;
        let target = target.0 as usize;
        let high = control.max(target);
        let low = control.min(target);
        let uninvolved = high - low - 1;

        let identity = Matrix::from_2x2(matrices::IDENTITY);

        let (mut lhs, mut rhs) = if control < target {
            (identity.clone(), Matrix::from_2x2(matrices::PAULI_X))
        } else {
            (
                Matrix::from_2x2(matrices::PROJ_ZERO),
                Matrix::from_2x2(matrices::PROJ_ONE),
            )
        };
        for _ in 0..uninvolved {
            lhs = identity.kron(&lhs);
            rhs = identity.kron(&rhs);
        }
        if control < target {
            lhs = Matrix::from_2x2(matrices::PROJ_ZERO).kron(&lhs);
            rhs = Matrix::from_2x2(matrices::PROJ_ONE).kron(&rhs);
        } else {
            lhs = identity.kron(&lhs);
            rhs = Matrix::from_2x2(matrices::PAULI_X).kron(&rhs);
        }
        let mut operator = lhs.add(&rhs);

        // Identity padding below the involved span, then above it.
        if high < NUM_QUBITS - 1 {
            let mut padding = identity.clone();
            for _ in (high + 1)..(NUM_QUBITS - 1) {
                padding = padding.kron(&identity);
            }
            operator = operator.kron(&padding);
        }
        for _ in 0..low {
            operator = identity.kron(&operator);
        }

        self.state = vec_mat_mul(&self.state, &operator);
    }

    /// The standard 15-gate Clifford+T decomposition over {H, T, T†, CNOT}.
    fn apply_toffoli(&mut self, c1: QubitId, c2: QubitId, target: QubitId) {
        self.apply_single(matrices::HADAMARD, target);
        self.apply_cnot(c2, target);
        self.apply_single(matrices::T_DAGGER, target);
        self.apply_cnot(c1, target);
        self.apply_single(matrices::T_GATE, target);
        self.apply_cnot(c2, target);
        self.apply_single(matrices::T_DAGGER, target);
        self.apply_cnot(c1, target);
        self.apply_single(matrices::T_GATE, c2);
        self.apply_single(matrices::T_GATE, target);
        self.apply_cnot(c1, c2);
        self.apply_single(matrices::HADAMARD, target);
        self.apply_single(matrices::T_GATE, c1);
        self.apply_single(matrices::T_DAGGER, c2);
        self.apply_cnot(c1, c2);
    }

    /// Sample `num_runs` measurements from the current distribution and
    /// replace the results histogram.
    fn generate_results(&mut self, num_runs: u32) {
        struct Interval {
            start: f64,
            end: f64,
            count: u32,
        }

        let mut intervals = Vec::with_capacity(STATE_VEC_SIZE);
        let mut last_end = 0.0;
        for amplitude in &self.state {
            let end = last_end + amplitude.norm_sqr();
            intervals.push(Interval {
                start: last_end,
                end,
                count: 0,
            });
            last_end = end;
        }

        for _ in 0..num_runs {
            let draw: f64 = self.rng.gen();
            // First matching interval wins; a draw past the final end
            // (normalisation round-off) lands in the last interval.
            let index = intervals
                .iter()
                .position(|interval| interval.start <= draw && draw <= interval.end)
                .unwrap_or(STATE_VEC_SIZE - 1);
            intervals[index].count += 1;
        }

        self.results = intervals
            .iter()
            .enumerate()
            .filter(|(_, interval)| interval.count > 0)
            .map(|(state, interval)| Outcome {
                state: state as u8,
                count: interval.count,
            })
            .collect();

        debug!(num_runs, outcomes = self.results.len(), "generated results");
    }
}

impl Default for Simulator<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn test_initial_state() {
        let simulator = Simulator::with_seed(1);
        let amplitudes = simulator.amplitudes();
        assert_eq!(amplitudes.len(), 1);
        assert_eq!(amplitudes[0].state, 0);
        assert!(approx_eq(amplitudes[0].amplitude, ONE));
    }

    #[test]
    fn test_step_without_program_is_noop() {
        let mut simulator = Simulator::with_seed(1);
        simulator.step(true);
        assert_eq!(simulator.next_gate_index(), 0);
        assert!(simulator.results().is_empty());
    }

    #[test]
    fn test_run_without_program_is_noop() {
        let mut simulator = Simulator::with_seed(1);
        simulator.run(100);
        assert!(simulator.results().is_empty());
    }

    #[test]
    fn test_step_past_end_is_noop() {
        let program = Program::assemble("x q0");
        let mut simulator = Simulator::with_seed(1);
        simulator.bind_program(&program);
        simulator.step(false);
        assert_eq!(simulator.next_gate_index(), 1);
        simulator.step(false);
        assert_eq!(simulator.next_gate_index(), 1);
    }

    #[test]
    fn test_single_step_generates_one_shot() {
        let program = Program::assemble("x q0");
        let mut simulator = Simulator::with_seed(1);
        simulator.bind_program(&program);
        simulator.step(true);
        assert_eq!(simulator.results(), &[Outcome { state: 128, count: 1 }]);
    }

    #[test]
    fn test_reset_keeps_results() {
        let program = Program::assemble("x q0");
        let mut simulator = Simulator::with_seed(1);
        simulator.bind_program(&program);
        simulator.run(10);
        assert!(!simulator.results().is_empty());

        simulator.reset();
        assert_eq!(simulator.next_gate_index(), 0);
        assert!(!simulator.results().is_empty());
        let amplitudes = simulator.amplitudes();
        assert_eq!(amplitudes.len(), 1);
        assert_eq!(amplitudes[0].state, 0);
    }

    #[test]
    fn test_rebind_resets_cursor() {
        let first = Program::assemble("x q0\nx q1");
        let second = Program::assemble("h q0");
        let mut simulator = Simulator::with_seed(1);
        simulator.bind_program(&first);
        simulator.step(false);
        assert_eq!(simulator.next_gate_index(), 1);

        simulator.bind_program(&second);
        assert_eq!(simulator.next_gate_index(), 0);
        assert_eq!(simulator.amplitudes()[0].state, 0);
    }

    #[test]
    fn test_qubit_state_basis() {
        let program = Program::assemble("x q2");
        let mut simulator = Simulator::with_seed(1);
        simulator.bind_program(&program);
        simulator.run(1);

        let [alpha, beta] = simulator.qubit_state(QubitId(2));
        assert!(approx_eq(alpha, ZERO));
        assert!(approx_eq(beta, ONE));

        let [alpha, beta] = simulator.qubit_state(QubitId(0));
        assert!(approx_eq(alpha, ONE));
        assert!(approx_eq(beta, ZERO));
    }

    #[test]
    fn test_qubit_state_squares_in_complex_field() {
        // (|00000000⟩ − |00010000⟩)/√2: the sign vanishes under squaring,
        // so both halves read 1/√2.
        let program = Program::assemble("h q3\nz q3");
        let mut simulator = Simulator::with_seed(1);
        simulator.bind_program(&program);
        simulator.run(1);

        let [alpha, beta] = simulator.qubit_state(QubitId(3));
        let expected = Complex64::new(0.5_f64.sqrt(), 0.0);
        assert!(approx_eq(alpha, expected));
        assert!(approx_eq(beta, expected));
    }
}
