// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Dense linear algebra: matrix products, LU decomposition and the solvers
//! built on it.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use num_traits::{Float, One, Zero};

use crate::{Element, ScalarOperand};

pub use self::lu::{back_substitution, forward_substitution, lu_decomposition, partial_pivoting, Lu};
pub use self::solve::{det, inv, lstsq, solve, solve_with};

mod impl_linalg;
mod lu;
mod solve;

/// Elements that support linear algebra operations.
///
/// `'static` for type-based specialization, `Copy` so that they don't need move
/// semantics or destructors, and the rest are numerical traits.
pub trait LinalgScalar:
    'static + Copy + Zero + One + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self>
{
}

impl<T> LinalgScalar for T where
    T: 'static + Copy + Zero + One + Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Div<Output = T>
{
}

/// Floating-point element types `f32` and `f64`.
///
/// The element types of the decomposition and solver routines.
///
/// This trait can only be implemented by `f32` and `f64`.
pub trait NdFloat:
    Float
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + fmt::Display
    + fmt::Debug
    + fmt::LowerExp
    + ScalarOperand
    + LinalgScalar
    + Element
    + Send
    + Sync
{
}

impl NdFloat for f32 {}
impl NdFloat for f64 {}

/// Options for [`solve_with`] and [`lu_decomposition`].
///
/// ```
/// use ndstrided::linalg::SolveOptions;
///
/// let opts = SolveOptions::new().singular_tolerance(1e-12).parallel(false);
/// assert!(opts.is_pivoting());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolveOptions {
    pivoting: bool,
    singular_tolerance: Option<f64>,
    parallel: bool,
}

impl Default for SolveOptions {
    /// Pivoting on, no singularity check, parallel column solves.
    fn default() -> Self {
        SolveOptions {
            pivoting: true,
            singular_tolerance: None,
            parallel: true,
        }
    }
}

impl SolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable row pivoting in the decomposition.
    pub fn pivoting(mut self, on: bool) -> Self {
        self.pivoting = on;
        self
    }

    /// Fail with `ErrorKind::SingularMatrix` when a pivot's magnitude is at
    /// most `tol`.
    ///
    /// Without a tolerance a zero pivot is not an error; the division
    /// produces infinities or NaN in the result.
    pub fn singular_tolerance(mut self, tol: f64) -> Self {
        self.singular_tolerance = Some(tol);
        self
    }

    /// Solve the right-hand-side columns in parallel. Has no effect without
    /// the `rayon` feature.
    pub fn parallel(mut self, on: bool) -> Self {
        self.parallel = on;
        self
    }

    pub fn is_pivoting(&self) -> bool {
        self.pivoting
    }

    pub fn tolerance(&self) -> Option<f64> {
        self.singular_tolerance
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }
}
