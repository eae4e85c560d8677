//! Cubic-time multiplication: the reference algorithm every faster path
//! is checked against.

use crate::matrix::Matrix;
use crate::transpose::transpose;

/// `a * b` via a freshly allocated, zeroed result.
pub fn mul_naive(a: &Matrix<'_>, b: &Matrix<'_>) -> Matrix<'static> {
    let mut c = Matrix::new(a.nrows(), b.ncols());
    addmul_naive(&mut c, a, b);
    c
}

/// `c += a * b`, computed as `AB` via a pre-transposed `B` so each output
/// entry is a row-row dot product instead of a row-column one.
pub fn addmul_naive(c: &mut Matrix<'_>, a: &Matrix<'_>, b: &Matrix<'_>) {
    debug_assert_eq!(a.ncols(), b.nrows());
    debug_assert_eq!(c.nrows(), a.nrows());
    debug_assert_eq!(c.ncols(), b.ncols());

    let bt = transpose(b);
    for i in 0..a.nrows() {
        for j in 0..bt.nrows() {
            let mut parity = 0u64;
            let mut col = 0;
            while col < a.ncols() {
                let n = (a.ncols() - col).min(64) as u32;
                let av = a.read_bits(i, col, n);
                let bv = bt.read_bits(j, col, n);
                parity ^= (av & bv).count_ones() as u64 & 1;
                col += n as usize;
            }
            if parity != 0 {
                c.flip_bit(i, j);
            }
        }
    }
}
