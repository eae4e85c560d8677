//! Strassen-Winograd multiplication: recursive 2x2 block decomposition
//! with 7 sub-products instead of 8, falling back to M4RM below a cutoff
//! sized from the configured L2 cache. Odd dimensions are peeled rather
//! than rejected.

use crate::arith::{add, add_assign};
use crate::gray;
use crate::matrix::Matrix;
use crate::mul::m4rm::addmul_m4rm;

/// `a * b` via Strassen-Winograd, recursing until any dimension drops to
/// `cutoff`, then multiplying the remainder with M4RM.
pub fn mul_strassen(a: &Matrix<'_>, b: &Matrix<'_>, cutoff: usize) -> Matrix<'static> {
    let mut c = Matrix::new(a.nrows(), b.ncols());
    addmul_strassen(&mut c, a, b, cutoff);
    c
}

/// `c += a * b` via Strassen-Winograd.
pub fn addmul_strassen(c: &mut Matrix<'_>, a: &Matrix<'_>, b: &Matrix<'_>, cutoff: usize) {
    let (m, l, n) = (a.nrows(), a.ncols(), b.ncols());
    debug_assert_eq!(l, b.nrows());
    debug_assert_eq!(c.nrows(), m);
    debug_assert_eq!(c.ncols(), n);

    if m.min(l).min(n) <= cutoff.max(1) {
        tracing::debug!(m, l, n, cutoff, "strassen: below cutoff, falling back to m4rm");
        addmul_m4rm(c, a, b, gray::opt_k(l, n));
        return;
    }

    // An odd inner dimension contributes a rank-1 correction (the outer
    // product of A's last column and B's last row) on top of the
    // even-inner-dimension product.
    if l % 2 == 1 {
        let a_main = a.window(0, 0, m, l - 1);
        let b_main = b.window(0, 0, l - 1, n);
        addmul_strassen(c, &a_main, &b_main, cutoff);

        let a_col = a.window(0, l - 1, m, l);
        let b_row = b.window(l - 1, 0, l, n);
        addmul_m4rm(c, &a_col, &b_row, 1);
        return;
    }

    // An odd row count or column count is peeled off as a strip, handled
    // with M4RM, and the remaining even-sized block recurses.
    if m % 2 == 1 {
        let a_top = a.window(0, 0, m - 1, l);
        let mut c_top = c.window_mut(0, 0, m - 1, n);
        addmul_strassen(&mut c_top, &a_top, b, cutoff);

        let a_bottom = a.window(m - 1, 0, m, l);
        let mut c_bottom = c.window_mut(m - 1, 0, m, n);
        addmul_m4rm(&mut c_bottom, &a_bottom, b, gray::opt_k(l, n));
        return;
    }
    if n % 2 == 1 {
        let b_left = b.window(0, 0, l, n - 1);
        let mut c_left = c.window_mut(0, 0, m, n - 1);
        addmul_strassen(&mut c_left, a, &b_left, cutoff);

        let b_right = b.window(0, n - 1, l, n);
        let mut c_right = c.window_mut(0, n - 1, m, n);
        addmul_m4rm(&mut c_right, a, &b_right, gray::opt_k(l, n));
        return;
    }

    tracing::debug!(m, l, n, cutoff, "strassen: recursing");
    winograd(c, a, b, cutoff);
}

/// The 2x2-block, 7-multiply Winograd schedule. Requires `m`, `l`, `n` all
/// even. Over GF(2) subtraction is addition, so every `S`/`T`/`U` term
/// below is an XOR.
fn winograd(c: &mut Matrix<'_>, a: &Matrix<'_>, b: &Matrix<'_>, cutoff: usize) {
    let (m, l, n) = (a.nrows(), a.ncols(), b.ncols());
    let (m2, l2, n2) = (m / 2, l / 2, n / 2);

    let a11 = a.window(0, 0, m2, l2);
    let a12 = a.window(0, l2, m2, l);
    let a21 = a.window(m2, 0, m, l2);
    let a22 = a.window(m2, l2, m, l);

    let b11 = b.window(0, 0, l2, n2);
    let b12 = b.window(0, n2, l2, n);
    let b21 = b.window(l2, 0, l, n2);
    let b22 = b.window(l2, n2, l, n);

    let s1 = add(&a21, &a22);
    let s2 = add(&s1, &a11);
    let s3 = add(&a11, &a21);
    let s4 = add(&a12, &s2);

    let t1 = add(&b12, &b11);
    let t2 = add(&b22, &t1);
    let t3 = add(&b22, &b12);
    let t4 = add(&t2, &b21);

    let m1 = mul_strassen(&a11, &b11, cutoff);
    let m2p = mul_strassen(&a12, &b21, cutoff);
    let m3 = mul_strassen(&s4, &b22, cutoff);
    let m4 = mul_strassen(&a22, &t4, cutoff);
    let m5 = mul_strassen(&s1, &t1, cutoff);
    let m6 = mul_strassen(&s2, &t2, cutoff);
    let m7 = mul_strassen(&s3, &t3, cutoff);

    let u1 = add(&m1, &m2p);
    let u2 = add(&m1, &m6);
    let u3 = add(&u2, &m7);
    let u4 = add(&u2, &m5);
    let u5 = add(&u4, &m3);
    let u6 = add(&u3, &m4);
    let u7 = add(&u3, &m5);

    add_assign(&mut c.window_mut(0, 0, m2, n2), &u1);
    add_assign(&mut c.window_mut(0, n2, m2, n), &u5);
    add_assign(&mut c.window_mut(m2, 0, m, n2), &u6);
    add_assign(&mut c.window_mut(m2, n2, m, n), &u7);
}
