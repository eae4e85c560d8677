//! M4RM: the "Method of the Four Russians" multiplication.
//!
//! For a block of `k` consecutive columns of `A` (and the corresponding
//! `k` rows of `B`), every one of the `2^k` possible linear combinations of
//! those `B` rows is built once, in Gray-code order so each table entry
//! costs one row-XOR, then every row of `A` looks its `k`-bit slice up in
//! the table instead of recomputing the combination.

use crate::gray::{self, MAXKAY};
use crate::matrix::Matrix;

/// `a * b`, choosing `k` via [`gray::opt_k`].
pub fn mul_m4rm(a: &Matrix<'_>, b: &Matrix<'_>) -> Matrix<'static> {
    let mut c = Matrix::new(a.nrows(), b.ncols());
    addmul_m4rm(&mut c, a, b, gray::opt_k(a.ncols(), b.ncols()));
    c
}

/// `c += a * b`, using table blocks of `k` columns at a time (`1 <= k <=
/// MAXKAY`). The last block shrinks to whatever remains of `a.ncols()`.
pub fn addmul_m4rm(c: &mut Matrix<'_>, a: &Matrix<'_>, b: &Matrix<'_>, k: u32) {
    debug_assert!(k >= 1 && k as usize <= MAXKAY);
    debug_assert_eq!(a.ncols(), b.nrows());
    debug_assert_eq!(c.nrows(), a.nrows());
    debug_assert_eq!(c.ncols(), b.ncols());

    let l = a.ncols();
    let n = b.ncols();
    let mut j = 0usize;
    while j < l {
        let block_k = (k as usize).min(l - j) as u32;
        build_and_apply_table(c, a, b, j, block_k, n);
        j += block_k as usize;
    }
}

fn build_and_apply_table(c: &mut Matrix<'_>, a: &Matrix<'_>, b: &Matrix<'_>, j: usize, k: u32, n: usize) {
    let code = gray::table(k);
    let size = 1usize << k;
    let mut table = Matrix::new(size, n);

    for s in 1..size {
        let prev = code.ord[s - 1] as usize;
        let cur = code.ord[s] as usize;
        table.copy_row(cur, prev);
        let b_row = j + code.inc[s] as usize;
        table.xor_row_from(cur, b, b_row);
    }

    for i in 0..a.nrows() {
        let x = a.read_bits(i, j, k) as usize;
        if x != 0 {
            c.xor_row_from(i, &table, x);
        }
    }
}
