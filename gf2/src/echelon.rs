//! M4RI echelonize.
//!
//! Processes the matrix in left-to-right blocks of up to `k` columns: for
//! each block, find as many pivot rows as the block's columns support
//! (`searching_for_pivot`/`compacting_k_block`), build a Gray-code table of
//! every linear combination of those pivot rows (`building_table`), then
//! XOR the right table row into every other row in one sweep
//! (`eliminating`), before `advancing` to the next block. Terminal state is
//! `done` once every row or every column has been consumed.
//!
//! One simplification relative to upstream M4RI: a column with no pivot
//! available is simply skipped rather than compacted into position via a
//! column swap. This keeps the result's column order identical to the
//! input's (required for the contract: pivots strictly increase in
//! column, not just in some permuted order) at the cost of upstream's
//! extra column-swap optimization, which [`crate::pluq`] performs instead
//! (there, column permutation is already part of the contract).

use crate::gray;
use crate::matrix::Matrix;

/// Row-reduces `a` in place and returns its rank. `full = false` leaves
/// `a` in row-echelon form; `full = true` leaves it in reduced row-echelon
/// form (every pivot column is a unit basis vector).
pub fn echelonize(a: &mut Matrix<'_>, full: bool) -> usize {
    let nrows = a.nrows();
    let ncols = a.ncols();
    let k_max = (gray::opt_k(nrows, ncols) as usize).max(1);

    let mut r = 0usize;
    let mut c = 0usize;
    while r < nrows && c < ncols {
        tracing::debug!(r, c, "echelonize: searching_for_pivot");
        let block_width = k_max.min(ncols - c);
        let (pivot_rows, pivot_cols) = find_and_compact_block(a, r, c, block_width, nrows);

        if pivot_rows.is_empty() {
            tracing::debug!(r, c, block_width, "echelonize: block had no pivots, advancing past it");
            c += block_width;
            continue;
        }

        tracing::debug!(r, c, npiv = pivot_rows.len(), "echelonize: building_table");
        eliminate_with_table(a, &pivot_rows, &pivot_cols, full);

        tracing::debug!(r, c, "echelonize: advancing");
        r += pivot_rows.len();
        c += block_width;
    }

    tracing::debug!(rank = r, "echelonize: done");
    r
}

/// Returns `a`'s rank without modifying `a`.
pub fn rank(a: &Matrix<'_>) -> usize {
    let mut scratch = a.to_owned_matrix();
    echelonize(&mut scratch, false)
}

/// Scans columns `[c, c+block_width)` for pivots, using only rows
/// `>= r` (and, within that, only rows not already claimed by an earlier
/// column of this same block). A column with no nonzero entry in the
/// remaining rows is skipped (`compacting_k_block`'s "skip, don't swap"
/// variant). Returns the pivot row indices (contiguous from `r`) and the
/// column each one pivots on.
fn find_and_compact_block(
    a: &mut Matrix<'_>,
    r: usize,
    c: usize,
    block_width: usize,
    nrows: usize,
) -> (Vec<usize>, Vec<usize>) {
    let mut pivot_rows = Vec::with_capacity(block_width);
    let mut pivot_cols = Vec::with_capacity(block_width);

    for j in 0..block_width {
        let col = c + j;
        let start_row = r + pivot_rows.len();
        let Some(found_row) = (start_row..nrows).find(|&row| a.read_bit(row, col)) else {
            continue;
        };
        a.row_swap(start_row, found_row);

        // Clear this column out of the pivot rows already chosen, so the
        // collected block stays triangular over its own pivot columns.
        for &prev_row in &pivot_rows {
            if a.read_bit(prev_row, col) {
                a.row_xor_with_offset(prev_row, start_row, col);
            }
        }

        pivot_rows.push(start_row);
        pivot_cols.push(col);
    }

    (pivot_rows, pivot_cols)
}

/// Builds the `2^npiv`-row Gray-code combination table over `pivot_rows`
/// and XORs the matching table row into every row outside `pivot_rows`
/// (every row if `full`, otherwise only rows from the first pivot row
/// onward).
fn eliminate_with_table(a: &mut Matrix<'_>, pivot_rows: &[usize], pivot_cols: &[usize], full: bool) {
    let npiv = pivot_rows.len() as u32;
    let code = gray::table(npiv);
    let size = 1usize << npiv;
    let ncols = a.ncols();

    let mut table = Matrix::new(size, ncols);
    for s in 1..size {
        let prev = code.ord[s - 1] as usize;
        let cur = code.ord[s] as usize;
        table.copy_row(cur, prev);
        let src_row = pivot_rows[code.inc[s] as usize];
        table.xor_row_from(cur, a, src_row);
    }

    let lo = if full { 0 } else { pivot_rows[0] };
    let pivot_set: std::collections::HashSet<usize> = pivot_rows.iter().copied().collect();
    for q in lo..a.nrows() {
        if pivot_set.contains(&q) {
            continue;
        }
        let x = block_index(a, q, pivot_cols);
        if x != 0 {
            a.xor_row_from(q, &table, x);
        }
    }
}

fn block_index(a: &Matrix<'_>, row: usize, pivot_cols: &[usize]) -> usize {
    let mut x = 0usize;
    for (bit, &col) in pivot_cols.iter().enumerate() {
        if a.read_bit(row, col) {
            x |= 1 << bit;
        }
    }
    x
}
