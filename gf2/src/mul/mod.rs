//! Matrix multiplication: three algorithms over the same contract, plus
//! a checked entry point for callers (the CLI) that need a `Result`
//! instead of a debug-assert panic on mismatched shapes.

pub mod m4rm;
pub mod naive;
pub mod strassen;

use crate::config::Cache;
use crate::error::{DimensionError, Result};
use crate::gray;
use crate::matrix::Matrix;

/// Which multiplication algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Naive,
    M4rm,
    Strassen,
}

/// Multiplies `a * b` with the chosen algorithm, returning a `Result`
/// instead of panicking when the inner dimensions disagree. The library's
/// internal hot paths (`mul_naive`, `mul_m4rm`, `mul_strassen`) stay
/// debug-assert-only; this wrapper exists for the CLI/public boundary.
pub fn checked_mul(a: &Matrix<'_>, b: &Matrix<'_>, algo: Algorithm, cache: &Cache) -> Result<Matrix<'static>> {
    if a.ncols() != b.nrows() {
        return Err(DimensionError::MulInnerMismatch {
            a_rows: a.nrows(),
            a_cols: a.ncols(),
            b_rows: b.nrows(),
            b_cols: b.ncols(),
        });
    }
    Ok(match algo {
        Algorithm::Naive => naive::mul_naive(a, b),
        Algorithm::M4rm => m4rm::mul_m4rm(a, b),
        Algorithm::Strassen => strassen::mul_strassen(a, b, cache.strassen_cutoff()),
    })
}

/// `mul_m4rm`'s block size as chosen by [`gray::opt_k`], exposed so the
/// CLI can report what an unqualified `mul --algo m4rm` run actually did.
pub fn default_k(a: &Matrix<'_>, b: &Matrix<'_>) -> u32 {
    gray::opt_k(a.ncols(), b.ncols())
}
