//! 2x2 complex matrix utilities
//!
//! Density matrices and Pauli operators are stored as `[[Complex64; 2]; 2]`
//! in row-major order. These helpers provide the handful of operations the
//! tomography pipeline needs without pulling in a general linear algebra
//! crate.

use num_complex::Complex64;

/// Row-major 2x2 complex matrix
pub type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// The 2x2 zero matrix
pub const ZEROS: Matrix2 = [[ZERO, ZERO], [ZERO, ZERO]];

/// The 2x2 identity matrix
pub const IDENTITY: Matrix2 = [[ONE, ZERO], [ZERO, ONE]];

/// Multiply two 2x2 complex matrices, C = A * B
#[inline]
pub fn multiply(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    [
        [
            a[0][0] * b[0][0] + a[0][1] * b[1][0],
            a[0][0] * b[0][1] + a[0][1] * b[1][1],
        ],
        [
            a[1][0] * b[0][0] + a[1][1] * b[1][0],
            a[1][0] * b[0][1] + a[1][1] * b[1][1],
        ],
    ]
}

/// Conjugate transpose A†
#[inline]
pub fn adjoint(a: &Matrix2) -> Matrix2 {
    [
        [a[0][0].conj(), a[1][0].conj()],
        [a[0][1].conj(), a[1][1].conj()],
    ]
}

/// Trace Tr(A)
#[inline]
pub fn trace(a: &Matrix2) -> Complex64 {
    a[0][0] + a[1][1]
}

/// Element-wise difference A - B
#[inline]
pub fn sub(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    [
        [a[0][0] - b[0][0], a[0][1] - b[0][1]],
        [a[1][0] - b[1][0], a[1][1] - b[1][1]],
    ]
}

/// Scale every element by a real factor
#[inline]
pub fn scale(a: &Matrix2, factor: f64) -> Matrix2 {
    [
        [a[0][0] * factor, a[0][1] * factor],
        [a[1][0] * factor, a[1][1] * factor],
    ]
}

/// Frobenius norm sqrt(Σ|aᵢⱼ|²)
#[inline]
pub fn frobenius_norm(a: &Matrix2) -> f64 {
    let mut sum = 0.0;
    for row in a {
        for elem in row {
            sum += elem.norm_sqr();
        }
    }
    sum.sqrt()
}

/// Largest element of |A - A†|, zero for a Hermitian matrix
#[inline]
pub fn hermiticity_defect(a: &Matrix2) -> f64 {
    let off = (a[0][1] - a[1][0].conj()).norm();
    let diag = a[0][0].im.abs().max(a[1][1].im.abs()) * 2.0;
    off.max(diag)
}

/// Check if two matrices agree element-wise within `epsilon`
#[inline]
pub fn approx_eq(a: &Matrix2, b: &Matrix2, epsilon: f64) -> bool {
    for i in 0..2 {
        for j in 0..2 {
            if (a[i][j] - b[i][j]).norm() > epsilon {
                return false;
            }
        }
    }
    true
}

/// Flatten to a row-major array of four elements
#[inline]
pub fn to_row_major(a: &Matrix2) -> [Complex64; 4] {
    [a[0][0], a[0][1], a[1][0], a[1][1]]
}

/// Build from a row-major array of four elements
#[inline]
pub fn from_row_major(elems: [Complex64; 4]) -> Matrix2 {
    [[elems[0], elems[1]], [elems[2], elems[3]]]
}
