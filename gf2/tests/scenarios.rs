//! End-to-end scenarios covering multiplication, echelonization, and
//! transposition together across a range of matrix shapes.

use gf2::echelon::echelonize;
use gf2::matrix::Matrix;
use gf2::mul::m4rm::mul_m4rm;
use gf2::mul::naive::mul_naive;
use gf2::mul::strassen::mul_strassen;
use gf2::transpose::transpose;
use rand::SeedableRng;

#[test]
fn identity_multiply_and_echelonize() {
    let id = Matrix::set_ui(4, 4, 1);
    let prod = mul_naive(&id, &id);
    assert!(prod.equal(&id));

    let mut a = Matrix::set_ui(4, 4, 1);
    let rank = echelonize(&mut a, true);
    assert_eq!(rank, 4);
    assert!(a.equal(&Matrix::set_ui(4, 4, 1)));
}

#[test]
fn three_by_three_rank_two() {
    let mut a = Matrix::new(3, 3);
    let bits = [[1, 1, 0], [0, 1, 1], [1, 0, 1]];
    for (i, row) in bits.iter().enumerate() {
        for (j, &v) in row.iter().enumerate() {
            a.write_bit(i, j, v != 0);
        }
    }

    let rank = echelonize(&mut a, true);
    assert_eq!(rank, 2);

    let mut nonzero_rows = Vec::new();
    for row in 0..3 {
        if !a.window(row, 0, row + 1, 3).is_zero() {
            let mut bits = [false; 3];
            for col in 0..3 {
                bits[col] = a.read_bit(row, col);
            }
            nonzero_rows.push(bits);
        }
    }
    assert_eq!(nonzero_rows, vec![[true, false, true], [false, true, true]]);
}

#[test]
fn sixty_four_square_algorithms_agree() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(1001);
    let mut a = Matrix::new(64, 64);
    a.randomize(&mut rng);
    let mut b = Matrix::new(64, 64);
    b.randomize(&mut rng);

    let naive = mul_naive(&a, &b);
    let m4rm = mul_m4rm(&a, &b);
    let strassen = mul_strassen(&a, &b, 32);
    assert!(naive.equal(&m4rm));
    assert!(naive.equal(&strassen));
}

#[test]
fn transpose_involution_and_symmetric_product() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(1002);
    let mut a = Matrix::new(193, 193);
    a.randomize(&mut rng);

    let tt = transpose(&transpose(&a));
    assert!(a.equal(&tt));

    let at = transpose(&a);
    let sym = mul_naive(&at, &a);
    let sym_t = transpose(&sym);
    assert!(sym.equal(&sym_t));
}

#[test]
fn two_hundred_square_rank_one_hundred() {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(1003);
    let mut top = Matrix::new(100, 200);
    top.randomize(&mut rng);

    let mut a = Matrix::new(200, 200);
    a.window_mut(0, 0, 100, 200).copy_from(&top);
    for i in 0..100 {
        for j in 0..200 {
            let v = top.read_bit(i, 200 - 1 - j);
            a.write_bit(100 + i, j, v);
        }
    }

    let rank = echelonize(&mut a, true);
    assert_eq!(rank, 100);
}

#[test]
fn window_writes_are_visible_through_parent() {
    let mut m = Matrix::new(128, 128);
    let mut rng = rand::rngs::SmallRng::seed_from_u64(1004);
    {
        let mut w = m.window_mut(10, 7, 74, 71);
        w.randomize(&mut rng);
    }

    let written = m.window(10, 7, 74, 71).to_owned_matrix();
    for i in 0..64 {
        for j in 0..64 {
            assert_eq!(m.read_bit(10 + i, 7 + j), written.read_bit(i, j));
        }
    }
    assert!(m.window(0, 0, 10, 128).is_zero());
    assert!(m.window(74, 0, 128, 128).is_zero());
    assert!(m.window(10, 0, 74, 7).is_zero());
    assert!(m.window(10, 71, 74, 128).is_zero());
}
