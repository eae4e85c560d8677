//! Whole-matrix addition, which over GF(2) is also subtraction. Used
//! directly by callers and internally by [`crate::mul::strassen`]'s
//! Winograd schedule.

use crate::matrix::{combine, Matrix};

/// Returns `a ^ b` as a fresh matrix. `a` and `b` must have the same shape.
pub fn add(a: &Matrix<'_>, b: &Matrix<'_>) -> Matrix<'static> {
    debug_assert_eq!(a.nrows(), b.nrows());
    debug_assert_eq!(a.ncols(), b.ncols());
    let mut out = Matrix::new(a.nrows(), a.ncols());
    for r in 0..a.nrows() {
        combine(&mut out, r, 0, a, r, 0, b, r, 0);
    }
    out
}

/// `c ^= a`, in place.
pub fn add_assign(c: &mut Matrix<'_>, a: &Matrix<'_>) {
    debug_assert_eq!(c.nrows(), a.nrows());
    debug_assert_eq!(c.ncols(), a.ncols());
    for r in 0..c.nrows() {
        c.xor_row_from(r, a, r);
    }
}
