// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use log::debug;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::{shape_mismatch, NdResult};
use crate::linalg::lu::{back_unchecked, forward_unchecked, lu_decomposition, require_square, Lu};
use crate::linalg::{NdFloat, SolveOptions};
use crate::Matrix;

/// Solve `A X = Y` for `X` with the default [`SolveOptions`].
///
/// ```
/// use ndstrided::linalg::solve;
/// use ndstrided::Matrix;
///
/// let a = Matrix::from_rows(vec![vec![2.0f64, 1.], vec![1., 3.]]).unwrap();
/// let y = Matrix::from_rows(vec![vec![3.], vec![5.]]).unwrap();
/// let x = solve(&a, &y).unwrap();
/// assert!((x[(0, 0)] - 0.8).abs() < 1e-12 && (x[(1, 0)] - 1.4).abs() < 1e-12);
/// ```
///
/// **Errors** if `a` is not square or `y` has a different number of rows.
/// A singular `a` is only an error with a configured tolerance; see
/// [`solve_with`].
pub fn solve<A: NdFloat>(a: &Matrix<A>, y: &Matrix<A>) -> NdResult<Matrix<A>> {
    solve_with(a, y, &SolveOptions::default())
}

/// Solve `A X = Y` for `X`.
///
/// `A` is decomposed as `P A = L U`; then for every column `y` of `Y`,
/// `L z = P y` is solved by forward substitution and `U x = z` by back
/// substitution. Columns are independent and, with the `rayon` feature and
/// `options.parallel`, are solved in parallel. The factors are only read
/// while the columns are solved, and all column work is joined before they
/// are dropped.
pub fn solve_with<A: NdFloat>(a: &Matrix<A>, y: &Matrix<A>, options: &SolveOptions) -> NdResult<Matrix<A>> {
    let n = require_square("solve", a)?;
    if y.rows() != n {
        return Err(shape_mismatch("solve", &[n, y.cols()], &[y.rows(), y.cols()]));
    }
    let m = y.cols();
    debug!(
        "solve: {}x{} system, {} right-hand sides, pivoting: {}, parallel: {}",
        n,
        n,
        m,
        options.is_pivoting(),
        parallel_enabled(options)
    );
    let lu = lu_decomposition(a, options)?;
    let py = lu.permute(y)?;
    let columns: Vec<Vec<A>> = (0..m).map(|j| py.col(j)).collect::<NdResult<_>>()?;
    let solved = solve_columns(&lu, columns, options);

    let mut x = Matrix::zeros(n, m);
    for (j, col) in solved.iter().enumerate() {
        for (i, &v) in col.iter().enumerate() {
            x[(i, j)] = v;
        }
    }
    Ok(x)
}

fn solve_column<A: NdFloat>(lu: &Lu<A>, y: &[A]) -> Vec<A> {
    let z = forward_unchecked(&lu.l, y);
    back_unchecked(&lu.u, &z)
}

#[cfg(feature = "rayon")]
fn parallel_enabled(options: &SolveOptions) -> bool {
    options.is_parallel()
}

#[cfg(not(feature = "rayon"))]
fn parallel_enabled(_options: &SolveOptions) -> bool {
    false
}

#[cfg(feature = "rayon")]
fn solve_columns<A: NdFloat>(lu: &Lu<A>, columns: Vec<Vec<A>>, options: &SolveOptions) -> Vec<Vec<A>> {
    if options.is_parallel() {
        columns.into_par_iter().map(|y| solve_column(lu, &y)).collect()
    } else {
        columns.into_iter().map(|y| solve_column(lu, &y)).collect()
    }
}

#[cfg(not(feature = "rayon"))]
fn solve_columns<A: NdFloat>(lu: &Lu<A>, columns: Vec<Vec<A>>, _options: &SolveOptions) -> Vec<Vec<A>> {
    columns.into_iter().map(|y| solve_column(lu, &y)).collect()
}

/// Inverse of a square matrix: `solve(a, I)`.
pub fn inv<A: NdFloat>(a: &Matrix<A>) -> NdResult<Matrix<A>> {
    let n = require_square("inv", a)?;
    solve(a, &Matrix::identity(n))
}

/// Least-squares estimate `b = (XᵀX)⁻¹ Xᵀ y` by the normal equations.
///
/// `y` has one row per row of `x`, and may have several columns.
///
/// **Errors** if the row counts differ.
pub fn lstsq<A: NdFloat>(x: &Matrix<A>, y: &Matrix<A>) -> NdResult<Matrix<A>> {
    if x.rows() != y.rows() {
        return Err(shape_mismatch("lstsq", &[x.rows(), y.cols()], &[y.rows(), y.cols()]));
    }
    debug!("lstsq: {} observations, {} parameters", x.rows(), x.cols());
    let xt = x.t();
    let xtx = xt.dot(x)?;
    let xty = xt.dot(y)?;
    inv(&xtx)?.dot(&xty)
}

/// Determinant from the LU factors: the product of the diagonal of `U`,
/// negated for an odd number of row exchanges.
pub fn det<A: NdFloat>(a: &Matrix<A>) -> NdResult<A> {
    require_square("det", a)?;
    let lu = lu_decomposition(a, &SolveOptions::new())?;
    let d = (0..a.rows()).fold(A::one(), |d, i| d * lu.u[(i, i)]);
    Ok(if lu.swaps % 2 == 1 { -d } else { d })
}

impl<A: NdFloat> Matrix<A> {
    /// Determinant, see [`det`].
    pub fn det(&self) -> NdResult<A> {
        det(self)
    }

    /// Inverse, see [`inv`].
    pub fn inv(&self) -> NdResult<Matrix<A>> {
        inv(self)
    }
}
