// Copyright 2014-2020 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::any::TypeId;

use crate::error::{require_2d, shape_mismatch, NdResult};
use crate::linalg::LinalgScalar;
use crate::{Element, Matrix, NDArray, Shape};

/// A strided 2-D operand: `base[offset + i * row_stride + j * col_stride]`.
#[derive(Copy, Clone)]
struct MatRef<'a, A> {
    base: &'a [A],
    offset: usize,
    rows: usize,
    cols: usize,
    row_stride: isize,
    col_stride: isize,
}

impl<'a, A: Copy> MatRef<'a, A> {
    fn of_matrix(m: &'a Matrix<A>) -> Self {
        MatRef {
            base: m.as_slice(),
            offset: 0,
            rows: m.rows(),
            cols: m.cols(),
            row_stride: m.cols() as isize,
            col_stride: 1,
        }
    }

    fn of_ndarray(a: &'a NDArray<A>) -> Self {
        MatRef {
            base: a.buffer().as_slice(),
            offset: a.offset(),
            rows: a.shape()[0],
            cols: a.shape()[1],
            row_stride: a.strides()[0],
            col_stride: a.strides()[1],
        }
    }

    #[inline]
    fn at(&self, i: usize, j: usize) -> A {
        self.base[(self.offset as isize + i as isize * self.row_stride + j as isize * self.col_stride) as usize]
    }
}

/// C ← A B, with `c` a fresh row-major `m × n` buffer.
///
/// `f32` and `f64` go to `matrixmultiply`, which takes arbitrary strides;
/// other element types use the naive triple loop.
fn mat_mul_impl<A>(lhs: &MatRef<'_, A>, rhs: &MatRef<'_, A>, c: &mut [A])
where
    A: LinalgScalar,
{
    let (m, k, n) = (lhs.rows, lhs.cols, rhs.cols);
    debug_assert_eq!(c.len(), m * n);
    if m == 0 || n == 0 {
        return;
    }
    if k == 0 {
        c.iter_mut().for_each(|x| *x = A::zero());
        return;
    }
    let ap = lhs.base[lhs.offset..].as_ptr();
    let bp = rhs.base[rhs.offset..].as_ptr();
    let cp = c.as_mut_ptr();
    if same_type::<A, f32>() {
        // Safety: the operands cover `m × k` and `k × n` elements at the
        // given strides, `c` holds `m × n`
        unsafe {
            matrixmultiply::sgemm(
                m,
                k,
                n,
                1.0,
                ap as *const f32,
                lhs.row_stride,
                lhs.col_stride,
                bp as *const f32,
                rhs.row_stride,
                rhs.col_stride,
                0.0,
                cp as *mut f32,
                n as isize,
                1,
            );
        }
    } else if same_type::<A, f64>() {
        unsafe {
            matrixmultiply::dgemm(
                m,
                k,
                n,
                1.0,
                ap as *const f64,
                lhs.row_stride,
                lhs.col_stride,
                bp as *const f64,
                rhs.row_stride,
                rhs.col_stride,
                0.0,
                cp as *mut f64,
                n as isize,
                1,
            );
        }
    } else {
        for i in 0..m {
            for j in 0..n {
                c[i * n + j] = (0..k).fold(A::zero(), |s, x| s + lhs.at(i, x) * rhs.at(x, j));
            }
        }
    }
}

fn same_type<A: 'static, B: 'static>() -> bool {
    TypeId::of::<A>() == TypeId::of::<B>()
}

fn check_inner(op: &str, lhs: &MatRef<'_, impl Copy>, rhs: &MatRef<'_, impl Copy>) -> NdResult<()> {
    if lhs.cols != rhs.rows {
        return Err(shape_mismatch(op, &[lhs.rows, lhs.cols], &[rhs.rows, rhs.cols]));
    }
    Ok(())
}

impl<A: LinalgScalar + Element> Matrix<A> {
    /// Matrix product `self × rhs`.
    ///
    /// ```
    /// use ndstrided::Matrix;
    ///
    /// let a = Matrix::from_rows(vec![vec![1., 2.], vec![3., 4.]]).unwrap();
    /// let i = Matrix::identity(2);
    /// assert_eq!(a.dot(&i).unwrap(), a);
    /// ```
    ///
    /// **Errors** if the inner dimensions differ.
    pub fn dot(&self, rhs: &Matrix<A>) -> NdResult<Matrix<A>> {
        let (l, r) = (MatRef::of_matrix(self), MatRef::of_matrix(rhs));
        check_inner("Matrix::dot", &l, &r)?;
        let mut c = vec![A::zero(); l.rows * r.cols];
        mat_mul_impl(&l, &r, &mut c);
        Matrix::from_vec(l.rows, r.cols, c)
    }

    /// Alias of [`dot`](Matrix::dot).
    pub fn matmul(&self, rhs: &Matrix<A>) -> NdResult<Matrix<A>> {
        self.dot(rhs)
    }

    /// Matrix-vector product.
    pub fn dot_vec(&self, v: &[A]) -> NdResult<Vec<A>> {
        if v.len() != self.cols() {
            return Err(shape_mismatch("Matrix::dot_vec", &[self.cols()], &[v.len()]));
        }
        let rhs = MatRef {
            base: v,
            offset: 0,
            rows: v.len(),
            cols: 1,
            row_stride: 1,
            col_stride: 1,
        };
        let mut c = vec![A::zero(); self.rows()];
        mat_mul_impl(&MatRef::of_matrix(self), &rhs, &mut c);
        Ok(c)
    }
}

impl<A: LinalgScalar + Element> NDArray<A> {
    /// Matrix product of two 2-D arrays, read in place through their
    /// strides; the result is C-contiguous.
    ///
    /// **Errors** with `UnsupportedOperation` unless both arrays are 2-D,
    /// and with `ShapeMismatch` if the inner dimensions differ.
    pub fn mdot(&self, rhs: &NDArray<A>) -> NdResult<NDArray<A>> {
        require_2d("mdot", self.ndim())?;
        require_2d("mdot", rhs.ndim())?;
        let (l, r) = (MatRef::of_ndarray(self), MatRef::of_ndarray(rhs));
        check_inner("mdot", &l, &r)?;
        let mut c = vec![A::zero(); l.rows * r.cols];
        mat_mul_impl(&l, &r, &mut c);
        Ok(NDArray::from_vec_c(Shape::new(vec![l.rows, r.cols]), c))
    }
}
