//! The packed bit matrix: storage layout, construction, and windows.
//!
//! A row of up to 64 columns lives in one [`Word`](crate::word::Word).
//! Longer rows span several words; [`Matrix::offset`] lets a row's first
//! logical column start mid-word, which is what makes windows (sub-matrix
//! views) possible without copying.

mod bits;

pub use bits::combine;

use crate::word::{self, Word, RADIX};

/// Caps `width` to avoid the cache-line-aligned stride pathology that
/// occurs when a row's word count is a small odd number: an odd `width`
/// of 3 or more gets one extra padding word.
fn padded_rowstride(width: usize) -> usize {
    if width >= 3 && width % 2 == 1 {
        width + 1
    } else {
        width
    }
}

fn words_for(ncols: usize, offset: u32) -> usize {
    let total = ncols + offset as usize;
    if total == 0 {
        0
    } else {
        (total + 63) / 64
    }
}

/// The underlying word storage of a [`Matrix`]: an owning allocation for a
/// freshly constructed matrix, or a borrow of a parent's allocation for a
/// window (`Mutable` from [`Matrix::window_mut`], `Shared` from
/// [`Matrix::window`]). The borrow checker enforces that a parent must
/// outlive all of its live windows, replacing manual reference-counted
/// ownership bookkeeping with a compile-time check. It does not stop a
/// caller from calling a `&mut self` method on a `Shared` window, since
/// both variants live on the one `Matrix` type; that case is instead
/// rejected at runtime by [`Storage::as_mut_slice`].
#[derive(Debug)]
enum Storage<'a> {
    Owned(Vec<Word>),
    Mutable(&'a mut [Word]),
    Shared(&'a [Word]),
}

impl<'a> Storage<'a> {
    fn as_slice(&self) -> &[Word] {
        match self {
            Storage::Owned(v) => v,
            Storage::Mutable(s) => s,
            Storage::Shared(s) => s,
        }
    }

    /// Panics if called on a `Shared` window: mutation through a window
    /// built by [`Matrix::window`] is a caller bug (use `window_mut`
    /// instead), not a state the type system rules out, so this has to be
    /// a runtime check rather than a match arm that can't be reached.
    fn as_mut_slice(&mut self) -> &mut [Word] {
        match self {
            Storage::Owned(v) => v,
            Storage::Mutable(s) => s,
            Storage::Shared(_) => {
                panic!("attempted to mutate a read-only window; use window_mut instead of window")
            }
        }
    }
}

/// A dense matrix over GF(2), packed one bit per column into 64-bit words.
///
/// `Matrix<'a>` is either an owning allocation (`'a == 'static`, constructed
/// by [`Matrix::new`]) or a window borrowing a parent's storage for its
/// lifetime `'a` (constructed by [`Matrix::window_mut`]). Reads and writes
/// through a window are visible in the parent at the same logical indices,
/// since both ultimately index the same backing slice.
#[derive(Debug)]
pub struct Matrix<'a> {
    nrows: usize,
    ncols: usize,
    offset: u32,
    width: usize,
    rowstride: usize,
    row_start: usize,
    storage: Storage<'a>,
}

impl Matrix<'static> {
    /// Allocates a fresh, zeroed `nrows` x `ncols` matrix.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        let width = words_for(ncols, 0);
        let rowstride = padded_rowstride(width);
        Matrix {
            nrows,
            ncols,
            offset: 0,
            width,
            rowstride,
            row_start: 0,
            storage: Storage::Owned(vec![0; rowstride * nrows]),
        }
    }

    /// Builds the zero matrix (`value == 0`) or the identity matrix on the
    /// top-left square (`value != 0`).
    pub fn set_ui(nrows: usize, ncols: usize, value: u64) -> Self {
        let mut m = Self::new(nrows, ncols);
        if value != 0 {
            for i in 0..nrows.min(ncols) {
                m.write_bit(i, i, true);
            }
        }
        m
    }
}

impl<'a> Matrix<'a> {
    /// Row count.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Column count.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Column offset of logical column 0 within the first word.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Words spanned by one logical row.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Words between the starts of consecutive rows.
    #[inline]
    pub fn rowstride(&self) -> usize {
        self.rowstride
    }

    /// True if this matrix borrows another matrix's storage.
    #[inline]
    pub fn is_window(&self) -> bool {
        matches!(self.storage, Storage::Mutable(_) | Storage::Shared(_))
    }

    #[inline]
    fn row_word_start(&self, row: usize) -> usize {
        debug_assert!(row < self.nrows, "row {row} out of bounds ({})", self.nrows);
        self.row_start + row * self.rowstride
    }

    /// Mask selecting the valid bits of the last word of a row.
    #[inline]
    pub fn high_bitmask(&self) -> Word {
        let total = (self.ncols + self.offset as usize) as u32 % RADIX;
        word::left_mask(total)
    }

    /// Mask selecting the valid bits of the first word of a row.
    #[inline]
    pub fn low_bitmask(&self) -> Word {
        word::right_mask(RADIX - self.offset)
    }

    /// Builds a mutable window over `[r0, r1) x [c0, c1)`.
    ///
    /// The window borrows `self`'s storage; writes through the window are
    /// observable through `self` once the window is dropped.
    pub fn window_mut(&mut self, r0: usize, c0: usize, r1: usize, c1: usize) -> Matrix<'_> {
        debug_assert!(r0 <= r1 && r1 <= self.nrows);
        debug_assert!(c0 <= c1 && c1 <= self.ncols);

        let nrows = r1 - r0;
        let ncols = c1 - c0;
        let abs_pos = self.offset as usize + c0;
        let word_skip = abs_pos / 64;
        let offset = (abs_pos % 64) as u32;
        let width = words_for(ncols, offset);
        let row_start = self.row_word_start(r0) + word_skip;

        Matrix {
            nrows,
            ncols,
            offset,
            width,
            rowstride: self.rowstride,
            row_start,
            storage: Storage::Mutable(self.storage.as_mut_slice()),
        }
    }

    /// Builds an immutable window, for algorithms that only read through it
    /// (e.g. reading one operand of a multiplication from a larger matrix).
    pub fn window(&self, r0: usize, c0: usize, r1: usize, c1: usize) -> Matrix<'_> {
        debug_assert!(r0 <= r1 && r1 <= self.nrows);
        debug_assert!(c0 <= c1 && c1 <= self.ncols);

        let nrows = r1 - r0;
        let ncols = c1 - c0;
        let abs_pos = self.offset as usize + c0;
        let word_skip = abs_pos / 64;
        let offset = (abs_pos % 64) as u32;
        let width = words_for(ncols, offset);
        let row_start = self.row_word_start(r0) + word_skip;

        Matrix {
            nrows,
            ncols,
            offset,
            width,
            rowstride: self.rowstride,
            row_start,
            storage: Storage::Shared(self.storage.as_slice()),
        }
    }

    /// Copies this matrix (or window) into a freshly allocated, unwindowed
    /// matrix with `offset == 0`.
    pub fn to_owned_matrix(&self) -> Matrix<'static> {
        let mut out = Matrix::new(self.nrows, self.ncols);
        for r in 0..self.nrows {
            let mut col = 0;
            while col < self.ncols {
                let n = (self.ncols - col).min(64) as u32;
                let v = self.read_bits(r, col, n);
                out.write_bits(r, col, n, v);
                col += n as usize;
            }
        }
        out
    }

    /// True if every logical bit is zero.
    pub fn is_zero(&self) -> bool {
        if self.ncols == 0 {
            return true;
        }
        let high_mask = self.high_bitmask();
        for r in 0..self.nrows {
            let base = self.row_word_start(r);
            let slice = self.storage.as_slice();
            for w in 0..self.width {
                let mask = if w == 0 { self.low_bitmask() } else { word::ALL_ONES };
                let mask = if w == self.width - 1 { mask & high_mask } else { mask };
                if slice[base + w] & mask != 0 {
                    return false;
                }
            }
        }
        true
    }

    /// Structural equality, ignoring don't-care bits outside the logical
    /// range of either matrix.
    pub fn equal(&self, other: &Matrix<'_>) -> bool {
        if self.nrows != other.nrows || self.ncols != other.ncols {
            return false;
        }
        for r in 0..self.nrows {
            let mut col = 0;
            while col < self.ncols {
                let n = (self.ncols - col).min(64) as u32;
                if self.read_bits(r, col, n) != other.read_bits(r, col, n) {
                    return false;
                }
                col += n as usize;
            }
        }
        true
    }

    /// A total order over matrices of the same shape: compares rows
    /// top-to-bottom, word-by-word within a row. Matrices of different
    /// shape compare by `(nrows, ncols)` first.
    pub fn cmp(&self, other: &Matrix<'_>) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        match self.nrows.cmp(&other.nrows).then(self.ncols.cmp(&other.ncols)) {
            Ordering::Equal => {}
            non_eq => return non_eq,
        }
        for r in 0..self.nrows {
            let mut col = 0;
            while col < self.ncols {
                let n = (self.ncols - col).min(64) as u32;
                let ord = self.read_bits(r, col, n).cmp(&other.read_bits(r, col, n));
                if ord != Ordering::Equal {
                    return ord;
                }
                col += n as usize;
            }
        }
        Ordering::Equal
    }

    /// Fills the matrix with pseudo-random bits, masking the boundary words
    /// so no garbage leaks into the don't-care positions of a window.
    pub fn randomize(&mut self, rng: &mut impl rand::RngCore) {
        let high_mask = self.high_bitmask();
        let low_mask = self.low_bitmask();
        let width = self.width;
        for r in 0..self.nrows {
            let base = self.row_word_start(r);
            let slice = self.storage.as_mut_slice();
            for w in 0..width {
                let mut mask = word::ALL_ONES;
                if w == 0 {
                    mask &= low_mask;
                }
                if w == width - 1 {
                    mask &= high_mask;
                }
                let old = slice[base + w];
                let new_bits = crate::rng::random_word(rng) & mask;
                slice[base + w] = (old & !mask) | new_bits;
            }
        }
    }

    /// The row index of the first all-zero row, or `nrows` if none.
    pub fn first_zero_row(&self) -> usize {
        for r in 0..self.nrows {
            let mut col = 0;
            let mut zero = true;
            while col < self.ncols {
                let n = (self.ncols - col).min(64) as u32;
                if self.read_bits(r, col, n) != 0 {
                    zero = false;
                    break;
                }
                col += n as usize;
            }
            if zero {
                return r;
            }
        }
        self.nrows
    }

    /// Finds the first column `>= start_col` in row `r` with a 1 bit, or
    /// `None` if the rest of the row is zero. Used by echelonize's pivot
    /// search and by [`crate::echelon::rank`] consumers to locate leading
    /// entries.
    pub fn find_pivot(&self, r: usize, start_col: usize) -> Option<usize> {
        let mut col = start_col;
        while col < self.ncols {
            let n = (self.ncols - col).min(64) as u32;
            let bits = self.read_bits(r, col, n);
            if bits != 0 {
                return Some(col + bits.trailing_zeros() as usize);
            }
            col += n as usize;
        }
        None
    }

    /// An approximate fraction of set bits, sampled rather than counted
    /// exactly. When `res == 0`, at most 100 evenly-strided words per row
    /// are sampled; when `res > 0`, every `res`-th word of every row is
    /// sampled. Upstream M4RI's two density estimators disagree on the
    /// exact cadence; this is the one fixed and documented here.
    pub fn density(&self, res: usize) -> f64 {
        let mut ones = 0u64;
        let mut total = 0u64;
        for r in 0..self.nrows {
            let base = self.row_word_start(r);
            let slice = self.storage.as_slice();
            let stride = if res == 0 {
                (self.width / 100).max(1)
            } else {
                res
            };
            let mut w = 0;
            while w < self.width {
                let mut mask = word::ALL_ONES;
                if w == 0 {
                    mask &= self.low_bitmask();
                }
                if w == self.width - 1 {
                    mask &= self.high_bitmask();
                }
                let bits = slice[base + w] & mask;
                ones += bits.count_ones() as u64;
                total += mask.count_ones() as u64;
                w += stride;
            }
        }
        if total == 0 {
            0.0
        } else {
            ones as f64 / total as f64
        }
    }
}

/// Stacks `top` above `bottom` (same column count) into a fresh matrix.
pub fn stack(top: &Matrix<'_>, bottom: &Matrix<'_>) -> Matrix<'static> {
    assert_eq!(top.ncols, bottom.ncols, "stack: column count mismatch");
    let mut out = Matrix::new(top.nrows + bottom.nrows, top.ncols);
    {
        let mut w = out.window_mut(0, 0, top.nrows, top.ncols);
        w.copy_from(top);
    }
    {
        let mut w = out.window_mut(top.nrows, 0, top.nrows + bottom.nrows, top.ncols);
        w.copy_from(bottom);
    }
    out
}

/// Concatenates `left` and `right` (same row count) side-by-side into a
/// fresh matrix.
pub fn concat(left: &Matrix<'_>, right: &Matrix<'_>) -> Matrix<'static> {
    assert_eq!(left.nrows, right.nrows, "concat: row count mismatch");
    let mut out = Matrix::new(left.nrows, left.ncols + right.ncols);
    {
        let mut w = out.window_mut(0, 0, left.nrows, left.ncols);
        w.copy_from(left);
    }
    {
        let mut w = out.window_mut(0, left.ncols, left.nrows, left.ncols + right.ncols);
        w.copy_from(right);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn rowstride_padding() {
        // width 3 is odd and >= 3: padded to 4.
        let m = Matrix::new(1, 3 * 64);
        assert_eq!(m.width(), 3);
        assert_eq!(m.rowstride(), 4);

        // width 2 stays as-is.
        let m = Matrix::new(1, 2 * 64);
        assert_eq!(m.width(), 2);
        assert_eq!(m.rowstride(), 2);

        // width 5 (odd, >= 3) gets padded.
        let m = Matrix::new(1, 5 * 64);
        assert_eq!(m.width(), 5);
        assert_eq!(m.rowstride(), 6);
    }

    #[test]
    fn bit_roundtrip() {
        let mut m = Matrix::new(4, 4);
        for v in [true, false] {
            m.write_bit(2, 3, v);
            assert_eq!(m.read_bit(2, 3), v);
        }
    }

    #[test]
    fn identity_and_zero() {
        let z = Matrix::set_ui(3, 3, 0);
        assert!(z.is_zero());

        let id = Matrix::set_ui(3, 3, 1);
        assert!(!id.is_zero());
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(id.read_bit(i, j), i == j);
            }
        }
    }

    #[test]
    fn window_aliases_parent() {
        let mut m = Matrix::new(128, 128);
        let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
        {
            let mut w = m.window_mut(10, 7, 74, 71);
            w.randomize(&mut rng);
        }
        // Bits outside the window must be untouched (still zero).
        assert!(m.window(0, 0, 10, 128).is_zero());
        assert!(m.window(74, 0, 128, 128).is_zero());
        assert!(m.window(10, 0, 74, 7).is_zero());
        assert!(m.window(10, 71, 74, 128).is_zero());
    }

    #[test]
    #[should_panic(expected = "use window_mut instead of window")]
    fn writing_through_a_shared_window_panics() {
        let m = Matrix::new(4, 4);
        let mut w = m.window(0, 0, 2, 2);
        w.write_bit(0, 0, true);
    }

    #[test]
    fn equal_ignores_dont_care_bits() {
        let mut a = Matrix::new(2, 5);
        let mut b = Matrix::new(2, 5);
        a.write_bit(0, 0, true);
        b.write_bit(0, 0, true);
        assert!(a.equal(&b));

        // A window sharing a's storage but covering only 5 of 64 columns
        // must compare equal to a freestanding 5-column matrix even though
        // the backing word has 59 don't-care bits set to garbage.
        let mut wide = Matrix::new(2, 64);
        {
            let mut w = wide.window_mut(0, 0, 2, 5);
            w.write_bit(0, 0, true);
        }
        wide.window_mut(0, 5, 2, 64).write_bit(0, 10, true); // garbage outside the 5-col span
        assert!(wide.window(0, 0, 2, 5).equal(&a));
    }

    #[test]
    fn stack_and_concat_roundtrip() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(11);
        let mut a = Matrix::new(3, 5);
        a.randomize(&mut rng);
        let mut b = Matrix::new(2, 5);
        b.randomize(&mut rng);

        let s = stack(&a, &b);
        assert_eq!(s.nrows(), 5);
        assert!(s.window(0, 0, 3, 5).equal(&a));
        assert!(s.window(3, 0, 5, 5).equal(&b));

        let mut c = Matrix::new(3, 2);
        c.randomize(&mut rng);
        let cc = concat(&a, &c);
        assert_eq!(cc.ncols(), 7);
        assert!(cc.window(0, 0, 3, 5).equal(&a));
        assert!(cc.window(0, 5, 3, 7).equal(&c));
    }
}
