use approx::assert_abs_diff_eq;
use num_traits::Float;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, StandardNormal};

use ndstrided::linalg::{det, inv, lstsq, solve, solve_with, SolveOptions};
use ndstrided::prelude::*;
use ndstrided::LinalgScalar;

// simple, slow, correct (hopefully) mat mul
fn reference_mat_mul<A: LinalgScalar>(lhs: &Matrix<A>, rhs: &Matrix<A>) -> Matrix<A> {
    let ((m, k), (_, n)) = (lhs.dim(), rhs.dim());
    let mut res_elems = Vec::<A>::with_capacity(m * n);
    for i in 0..m {
        for j in 0..n {
            res_elems.push((0..k).fold(A::zero(), move |s, x| s + lhs[(i, x)] * rhs[(x, j)]));
        }
    }
    Matrix::from_vec(m, n, res_elems).unwrap()
}

fn random_matrix<A>(rng: &mut SmallRng, rows: usize, cols: usize) -> Matrix<A>
where
    A: ndstrided::NdFloat,
    StandardNormal: Distribution<A>,
{
    let normal = Normal::new(A::zero(), A::one()).unwrap();
    Matrix::from_vec(rows, cols, (0..rows * cols).map(|_| normal.sample(rng)).collect()).unwrap()
}

/// A random matrix made diagonally dominant, hence well conditioned.
fn gen_well_conditioned(rng: &mut SmallRng, n: usize) -> Matrix<f64> {
    let mut a = random_matrix::<f64>(rng, n, n);
    for i in 0..n {
        a[(i, i)] += n as f64 * if a[(i, i)] < 0. { -1. } else { 1. };
    }
    a
}

/// max |a - b| / (rtol * |b| + atol) must stay at most one
fn assert_close<A: Float + std::fmt::Debug>(a: &Matrix<A>, b: &Matrix<A>, rtol: A, atol: A) {
    assert_eq!(a.dim(), b.dim());
    for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
        let tol = y.abs() * rtol + atol;
        if !((*x - *y).abs() <= tol) {
            panic!("results differ: {:?} vs {:?} (tolerance {:?})", x, y, tol);
        }
    }
}

#[test]
fn accurate_eye_f32() {
    let mut rng = SmallRng::seed_from_u64(1);
    for i in 0..20 {
        let eye = Matrix::identity(i);
        for j in 0..20 {
            let a = random_matrix::<f32>(&mut rng, i, j);
            let a2 = eye.dot(&a).unwrap();
            assert_close(&a2, &a, 0., 1e-6);
            let a3 = a.t().dot(&eye).unwrap();
            assert_close(&a3, &a.t(), 0., 1e-6);
        }
    }
    // pick a few random sizes
    for _ in 0..5 {
        let i = rng.random_range(15..128);
        let j = rng.random_range(15..128);
        println!("Testing size {} by {}", i, j);
        let a = random_matrix::<f32>(&mut rng, i, j);
        let a2 = Matrix::identity(i).dot(&a).unwrap();
        assert_close(&a2, &a, 0., 1e-6);
    }
}

#[test]
fn accurate_mul_f32() {
    let mut rng = SmallRng::seed_from_u64(2);
    for _ in 0..10 {
        let m = rng.random_range(15..128);
        let k = rng.random_range(15..128);
        let n = rng.random_range(15..256);
        let a = random_matrix::<f32>(&mut rng, m, k);
        let b = random_matrix::<f32>(&mut rng, n, k).t();
        println!("Testing size {} by {} by {}", m, k, n);
        let c = a.dot(&b).unwrap();
        assert_close(&c, &reference_mat_mul(&a, &b), 1e-3, 1e-4);
    }
}

#[test]
fn accurate_mul_f64_strided() {
    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..10 {
        let m = rng.random_range(15..128);
        let k = rng.random_range(15..128);
        let n = rng.random_range(15..128);
        let a = random_matrix::<f64>(&mut rng, m, k).to_ndarray();
        let b = random_matrix::<f64>(&mut rng, n, k).to_ndarray();
        // every other row and column, through a transposed view
        let av = a.slice_view(&s![0..m;2, 0..k;2]).unwrap();
        let bt = b.t();
        let bv = bt.slice_view(&s![0..k;2, 0..n;2]).unwrap();
        println!("Testing size {:?} by {:?}", av.shape(), bv.shape());
        let c = Matrix::from_ndarray(&av.mdot(&bv).unwrap()).unwrap();
        let reference = reference_mat_mul(
            &Matrix::from_ndarray(&av).unwrap(),
            &Matrix::from_ndarray(&bv).unwrap(),
        );
        assert_close(&c, &reference, 1e-7, 1e-12);
    }
}

#[test]
fn solve_residual_is_small() {
    let mut rng = SmallRng::seed_from_u64(4);
    for n in 1..40 {
        let a = gen_well_conditioned(&mut rng, n);
        let m = rng.random_range(1..6);
        let y = random_matrix::<f64>(&mut rng, n, m);
        let x = solve(&a, &y).unwrap();
        assert_close(&a.dot(&x).unwrap(), &y, 1e-9, 1e-9);
    }
}

#[test]
fn inverse_round_trip() {
    let mut rng = SmallRng::seed_from_u64(5);
    for n in 1..30 {
        let a = gen_well_conditioned(&mut rng, n);
        let ai = inv(&a).unwrap();
        assert_close(&a.dot(&ai).unwrap(), &Matrix::identity(n), 0., 1e-9);
        assert_close(&ai.dot(&a).unwrap(), &Matrix::identity(n), 0., 1e-9);
    }
}

#[test]
fn sequential_and_parallel_agree() {
    let mut rng = SmallRng::seed_from_u64(6);
    let a = gen_well_conditioned(&mut rng, 50);
    let y = random_matrix::<f64>(&mut rng, 50, 64);
    let par = solve_with(&a, &y, &SolveOptions::new().parallel(true)).unwrap();
    let seq = solve_with(&a, &y, &SolveOptions::new().parallel(false)).unwrap();
    assert_eq!(par, seq);
}

#[test]
fn pivoting_rescues_zero_leading_pivot() {
    let a = Matrix::from_rows(vec![vec![0., 1., 2.], vec![1., 0., 3.], vec![4., -3., 8.]]).unwrap();
    let y = Matrix::from_vec(3, 1, vec![1., 2., 3.]).unwrap();
    let x = solve(&a, &y).unwrap();
    assert_close(&a.dot(&x).unwrap(), &y, 1e-12, 1e-12);

    let unpivoted = solve_with(&a, &y, &SolveOptions::new().pivoting(false)).unwrap();
    assert!(unpivoted.as_slice().iter().any(|v| !v.is_finite()));
}

#[test]
fn least_squares_recovers_coefficients() {
    let mut rng = SmallRng::seed_from_u64(7);
    let beta = [0.5, -2.0, 3.25];
    let rows = 200;
    let mut x = Vec::with_capacity(rows * 3);
    let mut y = Vec::with_capacity(rows);
    for _ in 0..rows {
        let feats = [1.0, rng.random_range(-5.0..5.0), rng.random_range(-5.0..5.0)];
        y.push(feats.iter().zip(&beta).map(|(f, b)| f * b).sum::<f64>());
        x.extend_from_slice(&feats);
    }
    let x = Matrix::from_vec(rows, 3, x).unwrap();
    let y = Matrix::from_vec(rows, 1, y).unwrap();
    let b = lstsq(&x, &y).unwrap();
    for (i, want) in beta.iter().enumerate() {
        assert_abs_diff_eq!(b[(i, 0)], *want, epsilon = 1e-8);
    }
}

#[test]
fn determinant_is_multiplicative() {
    let mut rng = SmallRng::seed_from_u64(8);
    for n in 1..12 {
        let a = random_matrix::<f64>(&mut rng, n, n);
        let b = random_matrix::<f64>(&mut rng, n, n);
        let lhs = det(&a.dot(&b).unwrap()).unwrap();
        let rhs = det(&a).unwrap() * det(&b).unwrap();
        assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-8 * (1. + rhs.abs()));
    }
}
