//! Recoverable errors at the library's public boundary.
//!
//! Internal algorithm code sticks to `debug_assert!` and never threads
//! `Result` through hot loops; this type exists for the few
//! places user input crosses into the library from outside — principally
//! the `gf2-tools` CLI — where a malformed request should produce a
//! message instead of a release-mode panic.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DimensionError {
    #[error("cannot multiply a {a_rows}x{a_cols} matrix by a {b_rows}x{b_cols} matrix: inner dimensions disagree")]
    MulInnerMismatch {
        a_rows: usize,
        a_cols: usize,
        b_rows: usize,
        b_cols: usize,
    },

    #[error("result matrix is {got_rows}x{got_cols}, expected {want_rows}x{want_cols}")]
    ResultShapeMismatch {
        got_rows: usize,
        got_cols: usize,
        want_rows: usize,
        want_cols: usize,
    },

    #[error("stack requires equal column counts, got {left} and {right}")]
    StackColumnMismatch { left: usize, right: usize },

    #[error("concat requires equal row counts, got {left} and {right}")]
    ConcatRowMismatch { left: usize, right: usize },
}

pub type Result<T> = std::result::Result<T, DimensionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_non_empty() {
        let e = DimensionError::MulInnerMismatch {
            a_rows: 2,
            a_cols: 3,
            b_rows: 4,
            b_cols: 5,
        };
        assert!(!e.to_string().is_empty());
    }
}
