// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Dense row-major matrices for the linear-algebra layer.

use std::ops::{Index, IndexMut};

use num_traits::{One, Zero};

use crate::error::{from_kind, index_out_of_bounds, require_2d, shape_mismatch, ErrorKind, NdResult};
use crate::{Element, NDArray, Shape};

/// A dense two-dimensional matrix in row-major order.
///
/// Element `(i, j)` is at position `i * cols + j` of the owned buffer. The
/// linear-algebra routines in [`linalg`](crate::linalg) take and return
/// matrices; convert to and from [`NDArray`] with
/// [`from_ndarray`](Matrix::from_ndarray) and
/// [`to_ndarray`](Matrix::to_ndarray).
#[derive(Clone)]
pub struct Matrix<A> {
    data: Vec<A>,
    rows: usize,
    cols: usize,
}

impl<A> Matrix<A> {
    /// Create a matrix from its elements in row-major order.
    ///
    /// **Errors** if `v.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, v: Vec<A>) -> NdResult<Self> {
        if v.len() != rows * cols {
            return Err(shape_mismatch("Matrix::from_vec", &[rows, cols], &[v.len()]));
        }
        Ok(Matrix { data: v, rows, cols })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    #[inline]
    pub fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The elements in row-major order.
    pub fn as_slice(&self) -> &[A] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [A] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<A> {
        self.data
    }

    fn check(&self, op: &str, i: usize, j: usize) -> NdResult<usize> {
        if i >= self.rows {
            return Err(index_out_of_bounds(op, i as isize, Some(0), self.rows));
        }
        if j >= self.cols {
            return Err(index_out_of_bounds(op, j as isize, Some(1), self.cols));
        }
        Ok(i * self.cols + j)
    }

    /// Swap rows `a` and `b` in place.
    ///
    /// **Panics** if either row is out of bounds.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.data.split_at_mut(hi * self.cols);
        head[lo * self.cols..(lo + 1) * self.cols].swap_with_slice(&mut tail[..self.cols]);
    }
}

impl<A: Element> Matrix<A> {
    /// Create a `rows × cols` matrix with every element set to `x`.
    pub fn full(rows: usize, cols: usize, x: A) -> Self {
        Matrix {
            data: vec![x; rows * cols],
            rows,
            cols,
        }
    }

    /// Create a matrix from nested rows.
    ///
    /// **Errors** if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<A>>) -> NdResult<Self> {
        let a = NDArray::try_from(rows)?;
        Matrix::from_ndarray(&a)
    }

    /// Copy a 2-D array into a matrix.
    ///
    /// **Errors** with `UnsupportedOperation` unless `a` is 2-D.
    pub fn from_ndarray(a: &NDArray<A>) -> NdResult<Self> {
        require_2d("Matrix::from_ndarray", a.ndim())?;
        Ok(Matrix {
            data: a.to_vec(),
            rows: a.shape()[0],
            cols: a.shape()[1],
        })
    }

    /// Copy into a C-contiguous 2-D array.
    pub fn to_ndarray(&self) -> NDArray<A> {
        NDArray::from_vec_c(Shape::new(vec![self.rows, self.cols]), self.data.clone())
    }

    /// Return the element at `(i, j)`.
    ///
    /// **Errors** if either index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> NdResult<A> {
        let k = self.check("Matrix::get", i, j)?;
        Ok(self.data[k].clone())
    }

    /// Set the element at `(i, j)`.
    pub fn set(&mut self, i: usize, j: usize, x: A) -> NdResult<()> {
        let k = self.check("Matrix::set", i, j)?;
        self.data[k] = x;
        Ok(())
    }

    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> NdResult<Vec<A>> {
        if i >= self.rows {
            return Err(index_out_of_bounds("Matrix::row", i as isize, Some(0), self.rows));
        }
        Ok(self.data[i * self.cols..(i + 1) * self.cols].to_vec())
    }

    /// Copy of column `j`.
    pub fn col(&self, j: usize) -> NdResult<Vec<A>> {
        if j >= self.cols {
            return Err(index_out_of_bounds("Matrix::col", j as isize, Some(1), self.cols));
        }
        Ok((0..self.rows).map(|i| self.data[i * self.cols + j].clone()).collect())
    }

    /// Return the transposed matrix.
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            for i in 0..self.rows {
                data.push(self.data[i * self.cols + j].clone());
            }
        }
        Matrix {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Alias of [`transpose`](Matrix::transpose).
    pub fn t(&self) -> Self {
        self.transpose()
    }
}

impl<A: Element + Zero> Matrix<A> {
    /// Create a `rows × cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix::full(rows, cols, A::zero())
    }

    /// Sum of the diagonal.
    ///
    /// **Errors** unless the matrix is square.
    pub fn trace(&self) -> NdResult<A> {
        if !self.is_square() {
            return Err(from_kind(
                ErrorKind::ShapeMismatch,
                format!("trace: matrix of shape ({}, {}) is not square", self.rows, self.cols),
            ));
        }
        Ok((0..self.rows).fold(A::zero(), |acc, i| acc + self.data[i * self.cols + i].clone()))
    }
}

impl<A: Element + Zero + One> Matrix<A> {
    /// The `n × n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Matrix::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = A::one();
        }
        m
    }
}

impl<A> Index<(usize, usize)> for Matrix<A> {
    type Output = A;

    /// **Panics** if the index is out of bounds.
    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &A {
        assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for matrix of shape ({}, {})",
            i,
            j,
            self.rows,
            self.cols
        );
        &self.data[i * self.cols + j]
    }
}

impl<A> IndexMut<(usize, usize)> for Matrix<A> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut A {
        assert!(
            i < self.rows && j < self.cols,
            "index ({}, {}) out of bounds for matrix of shape ({}, {})",
            i,
            j,
            self.rows,
            self.cols
        );
        &mut self.data[i * self.cols + j]
    }
}

impl<A: Element> From<Matrix<A>> for NDArray<A> {
    fn from(m: Matrix<A>) -> NDArray<A> {
        NDArray::from_vec_c(Shape::new(vec![m.rows, m.cols]), m.data)
    }
}

impl<A: Element> TryFrom<&NDArray<A>> for Matrix<A> {
    type Error = crate::ArrayError;

    fn try_from(a: &NDArray<A>) -> NdResult<Self> {
        Matrix::from_ndarray(a)
    }
}
