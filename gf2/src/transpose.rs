//! Cache-oblivious transpose.
//!
//! The matrix is recursively halved along whichever dimension is larger
//! until both dimensions are a single 64-column/64-row block, at which
//! point the block is transposed in registers with the standard 6-stage
//! bit-butterfly. Any rows/columns left over past the last 64-aligned
//! boundary are handled bit-by-bit.

use crate::matrix::Matrix;

/// Transposes `a` into a freshly allocated `ncols x nrows` matrix.
pub fn transpose(a: &Matrix<'_>) -> Matrix<'static> {
    let mut out = Matrix::new(a.ncols(), a.nrows());
    transpose_into(&mut out, a);
    out
}

/// Transposes `a` into the already-allocated `out` (`out.nrows() ==
/// a.ncols()`, `out.ncols() == a.nrows()`).
pub fn transpose_into(out: &mut Matrix<'_>, a: &Matrix<'_>) {
    debug_assert_eq!(out.nrows(), a.ncols());
    debug_assert_eq!(out.ncols(), a.nrows());

    let rows_aligned = (a.nrows() / 64) * 64;
    let cols_aligned = (a.ncols() / 64) * 64;

    if rows_aligned > 0 && cols_aligned > 0 {
        transpose_aligned(out, a, 0, 0, rows_aligned, cols_aligned);
    }
    transpose_border(out, a, rows_aligned, cols_aligned);
}

/// Recursively halves a `rows_len x cols_len` block (both already multiples
/// of 64) until it's exactly one 64x64 base case, then transposes it.
fn transpose_aligned(
    out: &mut Matrix<'_>,
    a: &Matrix<'_>,
    r0: usize,
    c0: usize,
    rows_len: usize,
    cols_len: usize,
) {
    if rows_len == 64 && cols_len == 64 {
        transpose_block_64(out, a, r0, c0);
        return;
    }

    if rows_len >= cols_len && rows_len > 64 {
        let half = (rows_len / 128) * 64;
        transpose_aligned(out, a, r0, c0, half, cols_len);
        transpose_aligned(out, a, r0 + half, c0, rows_len - half, cols_len);
    } else {
        let half = (cols_len / 128) * 64;
        transpose_aligned(out, a, r0, c0, rows_len, half);
        transpose_aligned(out, a, r0, c0 + half, rows_len, cols_len - half);
    }
}

/// Transposes the 64x64 block of `a` at `(r0, c0)` into `out` at `(c0,
/// r0)`: gathers 64 rows as 64 words, runs the in-register bit transpose,
/// and scatters the 64 result words back as 64 rows.
fn transpose_block_64(out: &mut Matrix<'_>, a: &Matrix<'_>, r0: usize, c0: usize) {
    let mut rows = [0u64; 64];
    for (i, slot) in rows.iter_mut().enumerate() {
        *slot = a.read_bits(r0 + i, c0, 64);
    }
    bit_transpose_64(&mut rows);
    for (i, word) in rows.iter().enumerate() {
        out.write_bits(c0 + i, r0, 64, *word);
    }
}

/// The standard 6-stage butterfly that transposes a 64x64 bit matrix held
/// as 64 words (`rows[i]` bit `j` is the matrix's `(i, j)` entry) in place.
fn bit_transpose_64(rows: &mut [u64; 64]) {
    let mut j = 32u32;
    let mut mask: u64 = 0x0000_0000_FFFF_FFFF;
    while j != 0 {
        let mut k = 0usize;
        while k < 64 {
            for idx in k..k + j as usize {
                let t = (rows[idx] ^ (rows[idx + j as usize] >> j)) & mask;
                rows[idx] ^= t;
                rows[idx + j as usize] ^= t << j;
            }
            k += 2 * j as usize;
        }
        j >>= 1;
        mask ^= mask << j;
    }
}

/// Transposes whatever the aligned pass skipped: rows past
/// `rows_aligned` (all columns) and, for the aligned rows, columns past
/// `cols_aligned`.
fn transpose_border(out: &mut Matrix<'_>, a: &Matrix<'_>, rows_aligned: usize, cols_aligned: usize) {
    for r in rows_aligned..a.nrows() {
        for c in 0..a.ncols() {
            out.write_bit(c, r, a.read_bit(r, c));
        }
    }
    for r in 0..rows_aligned {
        for c in cols_aligned..a.ncols() {
            out.write_bit(c, r, a.read_bit(r, c));
        }
    }
}
