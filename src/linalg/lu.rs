// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use log::{trace, warn};

use crate::error::{from_kind, shape_mismatch, ErrorKind, NdResult};
use crate::linalg::{NdFloat, SolveOptions};
use crate::Matrix;

/// The factors of `P A = L U`.
///
/// `l` is unit lower triangular, `u` upper triangular and `p` the row
/// permutation (the identity when pivoting is off).
#[derive(Clone, Debug)]
pub struct Lu<A> {
    pub p: Matrix<A>,
    pub l: Matrix<A>,
    pub u: Matrix<A>,
    /// Row `i` of `P A` is row `perm[i]` of `A`
    pub perm: Vec<usize>,
    /// Number of row exchanges in `perm`
    pub swaps: usize,
}

impl<A: NdFloat> Lu<A> {
    /// Rows of `y` permuted like the rows of `A`: `P y`.
    pub fn permute(&self, y: &Matrix<A>) -> NdResult<Matrix<A>> {
        if y.rows() != self.perm.len() {
            return Err(shape_mismatch("Lu::permute", &[self.perm.len(), y.cols()], &[y.rows(), y.cols()]));
        }
        let mut out = Vec::with_capacity(y.rows() * y.cols());
        for &r in &self.perm {
            out.extend_from_slice(&y.as_slice()[r * y.cols()..(r + 1) * y.cols()]);
        }
        Matrix::from_vec(y.rows(), y.cols(), out)
    }
}

pub(crate) fn require_square<A>(op: &str, a: &Matrix<A>) -> NdResult<usize> {
    if !a.is_square() {
        return Err(from_kind(
            ErrorKind::ShapeMismatch,
            format!("{}: matrix of shape ({}, {}) is not square", op, a.rows(), a.cols()),
        ));
    }
    Ok(a.rows())
}

/// Row order chosen by Gaussian elimination with partial pivoting: at each
/// step the remaining row with the largest magnitude in the pivot column
/// is moved up.
fn pivot_order<A: NdFloat>(a: &Matrix<A>) -> (Vec<usize>, usize) {
    let n = a.rows();
    let mut w = a.clone();
    let mut perm: Vec<usize> = (0..n).collect();
    let mut swaps = 0;
    for k in 0..n {
        let mut p = k;
        for i in k + 1..n {
            if w[(i, k)].abs() > w[(p, k)].abs() {
                p = i;
            }
        }
        if p != k {
            trace!("pivot: column {}: swap rows {} and {}", k, k, p);
            w.swap_rows(k, p);
            perm.swap(k, p);
            swaps += 1;
        }
        let pivot = w[(k, k)];
        if pivot == A::zero() {
            continue;
        }
        for i in k + 1..n {
            let f = w[(i, k)] / pivot;
            for j in k..n {
                let x = w[(k, j)];
                w[(i, j)] -= f * x;
            }
        }
    }
    (perm, swaps)
}

fn permutation_matrix<A: NdFloat>(perm: &[usize]) -> Matrix<A> {
    let n = perm.len();
    let mut p = Matrix::zeros(n, n);
    for (i, &r) in perm.iter().enumerate() {
        p[(i, r)] = A::one();
    }
    p
}

/// Partial pivoting of a square matrix: return `(P, P A)`, where the
/// permutation `P` puts the largest-magnitude candidate of each column on
/// the diagonal as elimination proceeds.
///
/// **Errors** unless `a` is square.
pub fn partial_pivoting<A: NdFloat>(a: &Matrix<A>) -> NdResult<(Matrix<A>, Matrix<A>)> {
    require_square("partial_pivoting", a)?;
    let (perm, _) = pivot_order(a);
    let p = permutation_matrix(&perm);
    let pa = p.dot(a)?;
    Ok((p, pa))
}

/// LU decomposition by the Doolittle scheme, optionally with partial
/// pivoting (see [`SolveOptions`]).
///
/// ```
/// use ndstrided::linalg::{lu_decomposition, SolveOptions};
/// use ndstrided::Matrix;
///
/// let a = Matrix::from_rows(vec![vec![0., 1.], vec![2., 3.]]).unwrap();
/// let lu = lu_decomposition(&a, &SolveOptions::default()).unwrap();
/// assert_eq!(lu.l.dot(&lu.u).unwrap(), lu.p.dot(&a).unwrap());
/// ```
///
/// **Errors** unless `a` is square, and with `SingularMatrix` when a
/// tolerance is set and a pivot falls within it.
pub fn lu_decomposition<A: NdFloat>(a: &Matrix<A>, options: &SolveOptions) -> NdResult<Lu<A>> {
    let n = require_square("lu_decomposition", a)?;
    let (perm, swaps) = if options.is_pivoting() {
        pivot_order(a)
    } else {
        ((0..n).collect(), 0)
    };
    let p = permutation_matrix(&perm);
    let pa = if options.is_pivoting() { p.dot(a)? } else { a.clone() };

    let mut l = Matrix::<A>::zeros(n, n);
    let mut u = Matrix::<A>::zeros(n, n);
    for i in 0..n {
        for k in i..n {
            let s = (0..i).fold(A::zero(), |s, j| s + l[(i, j)] * u[(j, k)]);
            u[(i, k)] = pa[(i, k)] - s;
        }
        check_pivot(i, u[(i, i)], options)?;
        l[(i, i)] = A::one();
        for k in i + 1..n {
            let s = (0..i).fold(A::zero(), |s, j| s + l[(k, j)] * u[(j, i)]);
            l[(k, i)] = (pa[(k, i)] - s) / u[(i, i)];
        }
    }
    Ok(Lu { p, l, u, perm, swaps })
}

fn check_pivot<A: NdFloat>(i: usize, pivot: A, options: &SolveOptions) -> NdResult<()> {
    let mag = pivot.abs().to_f64().unwrap_or(f64::NAN);
    match options.tolerance() {
        Some(tol) if !(mag > tol) => Err(from_kind(
            ErrorKind::SingularMatrix,
            format!("lu_decomposition: pivot {} of magnitude {:e} is within tolerance {:e}", i, mag, tol),
        )),
        None if mag == 0. || !mag.is_finite() => {
            warn!("lu_decomposition: pivot {} is {}; result will contain inf or NaN", i, pivot);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn check_triangular<A>(op: &str, t: &Matrix<A>, y: &[A]) -> NdResult<usize> {
    let n = require_square(op, t)?;
    if y.len() != n {
        return Err(shape_mismatch(op, &[n], &[y.len()]));
    }
    Ok(n)
}

/// Solve `L x = y` for lower triangular `L`, first row to last.
///
/// Only the lower triangle of `l` is read. A zero diagonal entry yields
/// inf or NaN.
///
/// **Errors** if `l` is not square or `y` does not match its size.
pub fn forward_substitution<A: NdFloat>(l: &Matrix<A>, y: &[A]) -> NdResult<Vec<A>> {
    check_triangular("forward_substitution", l, y)?;
    Ok(forward_unchecked(l, y))
}

/// Solve `U x = y` for upper triangular `U`, last row to first.
///
/// Only the upper triangle of `u` is read.
///
/// **Errors** if `u` is not square or `y` does not match its size.
pub fn back_substitution<A: NdFloat>(u: &Matrix<A>, y: &[A]) -> NdResult<Vec<A>> {
    check_triangular("back_substitution", u, y)?;
    Ok(back_unchecked(u, y))
}

pub(crate) fn forward_unchecked<A: NdFloat>(l: &Matrix<A>, y: &[A]) -> Vec<A> {
    let n = y.len();
    let s = l.as_slice();
    let mut x = vec![A::zero(); n];
    for i in 0..n {
        let row = &s[i * n..i * n + i];
        let acc = row.iter().zip(&x[..i]).fold(A::zero(), |acc, (&lij, &xj)| acc + lij * xj);
        x[i] = (y[i] - acc) / s[i * n + i];
    }
    x
}

pub(crate) fn back_unchecked<A: NdFloat>(u: &Matrix<A>, y: &[A]) -> Vec<A> {
    let n = y.len();
    let s = u.as_slice();
    let mut x = vec![A::zero(); n];
    for i in (0..n).rev() {
        let row = &s[i * n + i + 1..(i + 1) * n];
        let acc = row.iter().zip(&x[i + 1..]).fold(A::zero(), |acc, (&uij, &xj)| acc + uij * xj);
        x[i] = (y[i] - acc) / s[i * n + i];
    }
    x
}
