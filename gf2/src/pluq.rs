//! PLUQ factorization: `P * A * Q = L * U` for row permutation `P`,
//! column permutation `Q`, unit-lower-triangular `L`, and upper-triangular
//! `U` truncated to the matrix's rank.
//!
//! Unlike [`crate::echelon::echelonize`], which keeps columns in their
//! original order, PLUQ is free to permute both rows and columns to bring
//! pivots onto the diagonal, which is what lets it extract a genuine
//! unit-lower-triangular `L` and upper-triangular `U`.

use crate::matrix::Matrix;

/// An ordered sequence of swap targets: applying it replays `row_swap(i,
/// targets[i])` (or `col_swap`) for `i` from `0` to `len() - 1`, matching
/// the order the swaps were originally recorded in.
#[derive(Debug, Clone)]
pub struct Permutation {
    targets: Vec<usize>,
}

impl Permutation {
    pub fn identity(n: usize) -> Self {
        Permutation { targets: (0..n).collect() }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn apply_left(&self, a: &mut Matrix<'_>) {
        for (i, &t) in self.targets.iter().enumerate() {
            a.row_swap(i, t);
        }
    }

    pub fn apply_right(&self, a: &mut Matrix<'_>) {
        for (i, &t) in self.targets.iter().enumerate() {
            a.col_swap(i, t);
        }
    }
}

/// The result of [`pluq`]: `P * A * Q == L * U`, with `L` (`m x rank`)
/// unit lower triangular and `U` (`rank x n`) upper triangular.
pub struct Pluq {
    pub p: Permutation,
    pub l: Matrix<'static>,
    pub u: Matrix<'static>,
    pub q: Permutation,
    pub rank: usize,
}

/// Factors `a` as `P * A * Q = L * U` by Gaussian elimination with full
/// (row and column) pivoting.
pub fn pluq(a: &Matrix<'_>) -> Pluq {
    let mut w = a.to_owned_matrix();
    let m = w.nrows();
    let n = w.ncols();

    let mut p = Permutation::identity(m);
    let mut q = Permutation::identity(n);
    let mut l = Matrix::set_ui(m, m, 1);

    let mut r = 0usize;
    while r < m && r < n {
        let pivot = (r..n).find_map(|col| (r..m).find(|&row| w.read_bit(row, col)).map(|row| (row, col)));
        let Some((pivot_row, pivot_col)) = pivot else {
            break;
        };

        w.row_swap(r, pivot_row);
        // Only the already-computed multiplier columns (< r) need to follow
        // the row swap: column r's entry doesn't exist yet, and the unit
        // diagonal at columns >= r is an init-time placeholder that must
        // stay put until that row is itself chosen as a pivot.
        for col in 0..r {
            let a_bit = l.read_bit(r, col);
            let b_bit = l.read_bit(pivot_row, col);
            l.write_bit(r, col, b_bit);
            l.write_bit(pivot_row, col, a_bit);
        }
        p.targets[r] = pivot_row;

        w.col_swap(r, pivot_col);
        q.targets[r] = pivot_col;

        for i in (r + 1)..m {
            if w.read_bit(i, r) {
                l.write_bit(i, r, true);
                w.row_xor_with_offset(i, r, r);
            }
        }
        r += 1;
    }

    let rank = r;
    let l = l.window(0, 0, m, rank).to_owned_matrix();
    let u = w.window(0, 0, rank, n).to_owned_matrix();

    Pluq { p, l, u, q, rank }
}
