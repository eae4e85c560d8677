//! Dense linear algebra over GF(2).
//!
//! Matrix elements are single bits packed 64 to a machine word; addition
//! is XOR and multiplication is AND. On top of the packed [`matrix::Matrix`]
//! type this crate builds row/column manipulation, Gray-code-table-driven
//! multiplication (M4RM) and row reduction (M4RI), Strassen-Winograd
//! recursion for large products, PLUQ factorization, and a
//! cache-oblivious transpose.
//!
//! ```
//! use gf2::matrix::Matrix;
//!
//! let id = Matrix::set_ui(4, 4, 1);
//! let prod = gf2::mul::naive::mul_naive(&id, &id);
//! assert!(prod.equal(&id));
//! ```

pub mod arith;
pub mod config;
pub mod echelon;
pub mod error;
pub mod gray;
pub mod lifecycle;
pub mod matrix;
pub mod mul;
pub mod pluq;
pub mod rng;
pub mod transpose;
pub mod word;
