//! Pseudo-random word generation used by [`crate::matrix::Matrix::randomize`].
//!
//! Upstream M4RI's `m4ri_random_word` XORs together three calls to a
//! 31-bit `random()` because C's `random()` does not fill a 64-bit word in
//! one call. `rand::RngCore::next_u64` already produces a full 64-bit word
//! directly, so that workaround has no counterpart here.

use rand::RngCore;

/// Draws one pseudo-random 64-bit word.
#[inline]
pub fn random_word(rng: &mut impl RngCore) -> u64 {
    rng.next_u64()
}
