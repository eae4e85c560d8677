//! Gray-code tables used by M4RM/M4RI to amortize row combination.
//!
//! For a block of `k` columns, walking the `2^k` values in Gray-code order
//! means each step flips exactly one bit relative to the previous value, so
//! the corresponding linear combination of rows can be built with a single
//! row-XOR per step instead of recomputing from scratch.

use std::sync::Mutex;

/// The largest `k` for which a table is precomputed. Matches upstream
/// M4RI's compiled-in `MAXKAY` (see DESIGN.md for the choice of 16).
pub const MAXKAY: usize = 16;

/// The order/increment tables for one value of `k`.
pub struct GrayCode {
    /// `ord[i]` is the `i`-th value in Gray-code order, `0 <= ord[i] < 2^k`.
    pub ord: Vec<u32>,
    /// `inc[j]` (for `j >= 1`) is the bit position (`0..k`) that differs
    /// between `ord[j-1]` and `ord[j]`. `inc[0]` is unused.
    pub inc: Vec<u32>,
}

fn gray_code(i: u32) -> u32 {
    i ^ (i >> 1)
}

/// Builds `ord`/`inc` for one `k`.
///
/// `inc[j]` is the number of trailing zero bits of `j` for `j >= 1`: this
/// is the standard closed form for "which bit flips at step `j` of a
/// binary-reflected Gray-code walk", equivalent to (but simpler than)
/// upstream's `m4ri_build_code`, which derives the same sequence through
/// an explicit per-`i` overwrite loop.
fn build_one(k: u32) -> GrayCode {
    let size = 1usize << k;
    let mut ord = vec![0u32; size];
    for i in 0..size {
        ord[i] = gray_code(i as u32);
    }

    let mut inc = vec![0u32; size];
    for (j, slot) in inc.iter_mut().enumerate().skip(1) {
        *slot = (j as u32).trailing_zeros();
    }

    GrayCode { ord, inc }
}

/// Chooses `k` for operands of inner dimensions `a, b`:
/// `k = min(MAXKAY, max(1, floor(0.75 * (1 + floor(log2(min(a, b)))))))`.
pub fn opt_k(a: usize, b: usize) -> u32 {
    let n = a.min(b).max(1);
    let log2_floor = (usize::BITS - 1 - n.leading_zeros()) as u32;
    let estimate = (0.75 * (1.0 + log2_floor as f64)).floor() as u32;
    estimate.max(1).min(MAXKAY as u32)
}

static TABLES: Mutex<Option<&'static [GrayCode]>> = Mutex::new(None);

fn build_all() -> Vec<GrayCode> {
    (0..=MAXKAY as u32).map(build_one).collect()
}

/// Returns the process-wide table set, building it on first use. Any
/// M4RM/M4RI call can be the one that triggers the build; callers never
/// need to call an explicit init function first.
pub fn tables() -> &'static [GrayCode] {
    let mut slot = TABLES.lock().unwrap();
    if slot.is_none() {
        *slot = Some(Box::leak(build_all().into_boxed_slice()));
    }
    slot.unwrap()
}

/// Drops the cached table set so the next [`tables`] call rebuilds it from
/// scratch. The table set being released is leaked rather than freed: it's
/// a handful of small, `'static`-lifetime allocations that are rebuilt at
/// most a few times per process, not a hot path worth reference-counting.
pub fn release() {
    let mut slot = TABLES.lock().unwrap();
    *slot = None;
}

/// Returns the table for a specific `k` (`1 <= k <= MAXKAY`).
pub fn table(k: u32) -> &'static GrayCode {
    debug_assert!(k >= 1 && k as usize <= MAXKAY);
    &tables()[k as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ord_is_a_gray_code_walk() {
        let t = build_one(4);
        assert_eq!(t.ord.len(), 16);
        assert_eq!(t.ord[0], 0);
        for w in t.ord.windows(2) {
            let diff = w[0] ^ w[1];
            assert_eq!(diff.count_ones(), 1, "{:?} -> {:?} flips != 1 bit", w[0], w[1]);
        }
        // Every value in [0, 16) appears exactly once.
        let mut seen: Vec<u32> = t.ord.clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn inc_reconstructs_ord_from_zero() {
        for k in 1..=6u32 {
            let t = build_one(k);
            let mut cur = 0u32;
            assert_eq!(t.ord[0], cur);
            for j in 1..t.ord.len() {
                cur ^= 1 << t.inc[j];
                assert_eq!(cur, t.ord[j], "k={k} j={j}");
            }
        }
    }

    #[test]
    fn opt_k_is_bounded() {
        for a in 1..1000 {
            let k = opt_k(a, a);
            assert!(k >= 1 && k as usize <= MAXKAY);
        }
        assert_eq!(opt_k(1, 1), 1);
    }

    #[test]
    fn tables_are_cached() {
        let a = tables();
        let b = tables();
        assert_eq!(a.len(), b.len());
        assert_eq!(a.len(), MAXKAY + 1);
    }

    #[test]
    fn release_forces_a_fresh_build() {
        let before = tables().as_ptr();
        release();
        let after = tables().as_ptr();
        assert_ne!(before, after, "release should force a fresh allocation, not reuse the old one");
        assert_eq!(tables().len(), MAXKAY + 1);
    }
}
