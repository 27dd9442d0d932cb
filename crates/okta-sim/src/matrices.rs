//! The 2x2 unitaries of the gate library, as compile-time constants where
//! possible, plus the parameterised rotation builders.

use num_complex::Complex64;

/// A 2x2 complex matrix in row-major order.
pub type Mat2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Identity.
pub const IDENTITY: Mat2 = [[ONE, ZERO], [ZERO, ONE]];

/// Hadamard: 1/√2 · [[1, 1], [1, -1]].
pub const HADAMARD: Mat2 = [
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(INV_SQRT2, 0.0),
    ],
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(-INV_SQRT2, 0.0),
    ],
];

/// Pauli-X: [[0, 1], [1, 0]].
pub const PAULI_X: Mat2 = [[ZERO, ONE], [ONE, ZERO]];

/// Pauli-Y: [[0, -i], [i, 0]].
pub const PAULI_Y: Mat2 = [[ZERO, NEG_I], [I, ZERO]];

/// Pauli-Z: [[1, 0], [0, -1]].
pub const PAULI_Z: Mat2 = [[ONE, ZERO], [ZERO, NEG_ONE]];

/// S: [[1, 0], [0, i]].
pub const S_GATE: Mat2 = [[ONE, ZERO], [ZERO, I]];

/// S†: [[1, 0], [0, -i]].
pub const S_DAGGER: Mat2 = [[ONE, ZERO], [ZERO, NEG_I]];

/// T: [[1, 0], [0, e^(iπ/4)]] with e^(iπ/4) = (1+i)/√2.
pub const T_GATE: Mat2 = [[ONE, ZERO], [ZERO, Complex64::new(INV_SQRT2, INV_SQRT2)]];

/// T†: [[1, 0], [0, e^(-iπ/4)]].
pub const T_DAGGER: Mat2 = [[ONE, ZERO], [ZERO, Complex64::new(INV_SQRT2, -INV_SQRT2)]];

/// Projector onto |0⟩: [[1, 0], [0, 0]].
pub const PROJ_ZERO: Mat2 = [[ONE, ZERO], [ZERO, ZERO]];

/// Projector onto |1⟩: [[0, 0], [0, 1]].
pub const PROJ_ONE: Mat2 = [[ZERO, ZERO], [ZERO, ONE]];

/// Rotation around X: [[cos(θ/2), -i·sin(θ/2)], [-i·sin(θ/2), cos(θ/2)]].
pub fn rx(theta: f64) -> Mat2 {
    let cos = Complex64::new((theta / 2.0).cos(), 0.0);
    let neg_i_sin = Complex64::new(0.0, -(theta / 2.0).sin());
    [[cos, neg_i_sin], [neg_i_sin, cos]]
}

/// Rotation around Y: [[cos(θ/2), -sin(θ/2)], [-sin(θ/2), cos(θ/2)]].
pub fn ry(theta: f64) -> Mat2 {
    let cos = Complex64::new((theta / 2.0).cos(), 0.0);
    let neg_sin = Complex64::new(-(theta / 2.0).sin(), 0.0);
    [[cos, neg_sin], [neg_sin, cos]]
}

/// Rotation around Z: [[e^(-iθ/2), 0], [0, e^(iθ/2)]].
pub fn rz(theta: f64) -> Mat2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
    ]
}
