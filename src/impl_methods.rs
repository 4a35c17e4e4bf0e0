// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::ops::{Index, IndexMut};

use num_traits::{AsPrimitive, One, Zero};

use crate::dimension::{self, Axis, IntoShape, Shape, Strides};
use crate::error::{
    from_kind, index_out_of_bounds, ndim_mismatch, not_writeable, shape_mismatch, ErrorKind, NdResult,
};
use crate::{Buffer, DType, Element, Flags, NDArray, Order};

/// # Methods For All Arrays
impl<A> NDArray<A> {
    /// Return the total number of elements in the array.
    #[inline]
    pub fn size(&self) -> usize {
        self.shape.size()
    }

    /// Alias of [`size`](NDArray::size).
    #[inline]
    pub fn len(&self) -> usize {
        self.shape.size()
    }

    /// Return whether the array has any elements
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Return the number of dimensions (axes) in the array
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Return the shape of the array as a slice.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.shape.as_slice()
    }

    /// Return the shape of the array as a [`Shape`].
    #[inline]
    pub fn raw_shape(&self) -> &Shape {
        &self.shape
    }

    /// Return the strides of the array as a slice.
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.strides.as_slice()
    }

    /// Return the strides of the array as [`Strides`].
    #[inline]
    pub fn raw_strides(&self) -> &Strides {
        &self.strides
    }

    /// Element offset of the first element in the buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// The buffer the array addresses.
    #[inline]
    pub fn buffer(&self) -> &Buffer<A> {
        &self.data
    }

    #[inline]
    pub fn is_c_contiguous(&self) -> bool {
        self.flags.c_contiguous()
    }

    #[inline]
    pub fn is_f_contiguous(&self) -> bool {
        self.flags.f_contiguous()
    }

    #[inline]
    pub fn owns_data(&self) -> bool {
        self.flags.owndata()
    }

    #[inline]
    pub fn is_writeable(&self) -> bool {
        self.flags.writeable()
    }

    /// Return true if the array is a view of another array's buffer.
    #[inline]
    pub fn is_view(&self) -> bool {
        !self.flags.owndata()
    }

    /// The memory order if the array's geometry is canonical C or F
    /// (C wins for arrays that are both), otherwise `None`.
    pub(crate) fn memory_order(&self) -> Option<Order> {
        if dimension::is_c_contiguous(&self.shape, &self.strides) {
            Some(Order::C)
        } else if dimension::is_f_contiguous(&self.shape, &self.strides) {
            Some(Order::F)
        } else {
            None
        }
    }

    /// Return the elements as a slice if the array is C-contiguous.
    pub fn as_slice(&self) -> Option<&[A]> {
        if dimension::is_c_contiguous(&self.shape, &self.strides) {
            Some(&self.data.as_slice()[self.offset..self.offset + self.size()])
        } else {
            None
        }
    }

    /// Return the elements in memory order if the array is C- or
    /// F-contiguous.
    pub fn as_slice_memory_order(&self) -> Option<&[A]> {
        self.memory_order()
            .map(|_| &self.data.as_slice()[self.offset..self.offset + self.size()])
    }

    /// Buffer position of the element at in-bounds `coords`.
    #[inline]
    pub(crate) fn position(&self, coords: &[usize]) -> usize {
        (self.offset as isize + self.strides.offset_of(coords)) as usize
    }

    /// Map a row-major linear index to its buffer position.
    ///
    /// C-contiguous arrays address the buffer directly; every other layout
    /// goes through the coordinates, so linear order is always logical
    /// (row-major) order whatever the physical layout.
    #[inline]
    pub(crate) fn linear_position(&self, index: usize) -> usize {
        if self.flags.c_contiguous() {
            self.offset + index
        } else {
            self.position(&self.shape.unravel_index(index))
        }
    }

    fn check_coords(&self, op: &str, coords: &[isize]) -> NdResult<Vec<usize>> {
        if coords.len() != self.ndim() {
            return Err(ndim_mismatch(op, self.ndim(), coords.len()));
        }
        coords
            .iter()
            .zip(self.shape())
            .enumerate()
            .map(|(axis, (&i, &len))| {
                dimension::normalize_index(i, len).ok_or_else(|| index_out_of_bounds(op, i, Some(axis), len))
            })
            .collect()
    }

    fn check_linear(&self, op: &str, index: isize) -> NdResult<usize> {
        dimension::normalize_index(index, self.size()).ok_or_else(|| index_out_of_bounds(op, index, None, self.size()))
    }

    /// Return a reference to the element at `coords`, or `None` if the
    /// coordinates are out of bounds.
    pub fn get(&self, coords: &[usize]) -> Option<&A> {
        if coords.len() != self.ndim() || coords.iter().zip(self.shape()).any(|(&i, &d)| i >= d) {
            return None;
        }
        Some(&self.data.as_slice()[self.position(coords)])
    }

    /// Return a reference to the element at `coords` without bounds checks.
    ///
    /// ## Safety
    ///
    /// `coords` must have `ndim` entries, each within its axis.
    #[inline]
    pub unsafe fn uget(&self, coords: &[usize]) -> &A {
        ndassert!(coords.len() == self.ndim(), "uget: {} coords for {} axes", coords.len(), self.ndim());
        self.data.as_slice().get_unchecked(self.position(coords))
    }

    /// Mutable slice of the whole buffer, unsharing it from any views.
    pub(crate) fn buffer_mut(&mut self, op: &str) -> NdResult<&mut [A]>
    where
        A: Clone,
    {
        if !self.flags.writeable() {
            return Err(not_writeable(op));
        }
        self.data.make_mut().ok_or_else(|| not_writeable(op))
    }

    /// Swap axes `ax` and `bx` in place, without moving any element.
    ///
    /// **Panics** if an axis is out of bounds.
    pub fn swap_axes(&mut self, ax: usize, bx: usize) {
        let mut dims = self.shape.clone().into_vec();
        dims.swap(ax, bx);
        self.shape = Shape::new(dims);
        self.strides.as_mut_slice().swap(ax, bx);
        self.flags = Flags::classify(&self.shape, &self.strides, self.flags.owndata(), self.flags.writeable());
    }

    /// Return a zero-copy, read-only view of the array.
    pub fn view(&self) -> NDArray<A> {
        NDArray::from_buffer(
            self.data.share(),
            self.offset,
            self.shape.clone(),
            self.strides.clone(),
            false,
            false,
        )
    }

    /// Return a view with the axes permuted: axis `i` of the result is axis
    /// `axes[i]` of `self`.
    ///
    /// **Errors** if `axes` is not a permutation of `0..ndim`.
    pub fn permute_axes(&self, axes: &[usize]) -> NdResult<NDArray<A>> {
        if axes.len() != self.ndim() {
            return Err(ndim_mismatch("permute_axes", self.ndim(), axes.len()));
        }
        let mut seen = vec![false; self.ndim()];
        for &ax in axes {
            if ax >= self.ndim() || seen[ax] {
                return Err(from_kind(
                    ErrorKind::UnsupportedOperation,
                    format!("permute_axes: {:?} is not a permutation of 0..{}", axes, self.ndim()),
                ));
            }
            seen[ax] = true;
        }
        let shape = Shape::new(axes.iter().map(|&ax| self.shape[ax]).collect());
        let strides = Strides::new(axes.iter().map(|&ax| self.strides[ax]).collect());
        Ok(NDArray::from_buffer(self.data.share(), self.offset, shape, strides, false, false))
    }

    /// Return a view with the order of the axes reversed. The transpose of
    /// a C-contiguous array is F-contiguous.
    pub fn transpose(&self) -> NDArray<A> {
        let shape = Shape::new(self.shape().iter().rev().cloned().collect());
        let strides = Strides::new(self.strides().iter().rev().cloned().collect());
        NDArray::from_buffer(self.data.share(), self.offset, shape, strides, false, false)
    }

    /// Alias of [`transpose`](NDArray::transpose).
    #[inline]
    pub fn t(&self) -> NDArray<A> {
        self.transpose()
    }
}

/// # Element Access
impl<A: Element> NDArray<A> {
    /// Return the element at row-major linear `index`.
    ///
    /// Negative indices count from the end. Linear order is logical order,
    /// independent of the memory layout.
    ///
    /// **Errors** if the index is out of bounds.
    pub fn item(&self, index: isize) -> NdResult<A> {
        let i = self.check_linear("item", index)?;
        Ok(self.data.as_slice()[self.linear_position(i)].clone())
    }

    /// Return the element at `coords`; negative coordinates count from the
    /// end of their axis.
    ///
    /// **Errors** if the number of coordinates is not `ndim`, or if any
    /// coordinate is out of bounds.
    pub fn item_at(&self, coords: &[isize]) -> NdResult<A> {
        let coords = self.check_coords("item_at", coords)?;
        Ok(self.data.as_slice()[self.position(&coords)].clone())
    }

    /// Set the element at row-major linear `index`.
    pub fn itemset(&mut self, index: isize, value: A) -> NdResult<()> {
        let i = self.check_linear("itemset", index)?;
        let pos = self.linear_position(i);
        self.buffer_mut("itemset")?[pos] = value;
        Ok(())
    }

    /// Set the element at `coords`.
    pub fn itemset_at(&mut self, coords: &[isize], value: A) -> NdResult<()> {
        let coords = self.check_coords("itemset_at", coords)?;
        let pos = self.position(&coords);
        self.buffer_mut("itemset_at")?[pos] = value;
        Ok(())
    }

    /// Read the element at flat position `index` in memory order.
    ///
    /// For contiguous arrays this is the `index`-th element of the
    /// buffer region the array covers; other layouts fall back to logical
    /// order. Negative indices count from the end.
    pub fn load(&self, index: isize) -> NdResult<A> {
        let index = self.check_linear("load", index)?;
        Ok(self.data.as_slice()[self.flat_position(index)].clone())
    }

    /// Write the element at flat position `index` in memory order.
    pub fn store(&mut self, index: isize, value: A) -> NdResult<()> {
        let index = self.check_linear("store", index)?;
        let pos = self.flat_position(index);
        self.buffer_mut("store")?[pos] = value;
        Ok(())
    }

    fn flat_position(&self, index: usize) -> usize {
        match self.memory_order() {
            Some(_) => self.offset + index,
            None => self.linear_position(index),
        }
    }

    /// The element of a 0-D (or any single-element) array.
    ///
    /// **Errors** if the array does not have exactly one element.
    pub fn to_scalar(&self) -> NdResult<A> {
        if self.size() != 1 {
            return Err(from_kind(
                ErrorKind::UnsupportedOperation,
                format!("to_scalar: array of shape {:?} has {} elements", self.shape, self.size()),
            ));
        }
        Ok(self.data.as_slice()[self.offset].clone())
    }

    /// The element type tag.
    pub fn dtype(&self) -> DType {
        A::DTYPE
    }

    /// Return the elements in logical (row-major) order.
    pub fn to_vec(&self) -> Vec<A> {
        if let Some(s) = self.as_slice() {
            return s.to_vec();
        }
        self.iter().cloned().collect()
    }

    /// Return a copy with the given shape, filled in logical order.
    ///
    /// **Errors** if the sizes differ.
    pub fn reshape(&self, shape: impl IntoShape) -> NdResult<NDArray<A>> {
        let shape = shape.into_shape();
        if shape.size() != self.size() {
            return Err(shape_mismatch("reshape", shape.as_slice(), self.shape()));
        }
        Ok(NDArray::from_vec_c(shape, self.to_vec()))
    }

    /// Consume the array and return it with a new shape.
    ///
    /// A uniquely owned C-contiguous buffer is reused without copying.
    pub fn into_shape(self, shape: impl IntoShape) -> NdResult<NDArray<A>> {
        let shape = shape.into_shape();
        if shape.size() != self.size() {
            return Err(shape_mismatch("into_shape", shape.as_slice(), self.shape()));
        }
        if self.flags.owndata() && self.offset == 0 && self.as_slice().is_some() {
            let strides = Strides::c_order(&shape);
            let writeable = self.flags.writeable();
            return Ok(NDArray::from_buffer(self.data, 0, shape, strides, true, writeable));
        }
        Ok(NDArray::from_vec_c(shape, self.to_vec()))
    }

    /// Return a 1-D copy of the elements in logical order.
    pub fn flatten(&self) -> NDArray<A> {
        NDArray::from_vec1(self.to_vec())
    }

    /// Return a copy of the 2-D array's row `i`.
    ///
    /// **Errors** with `UnsupportedOperation` unless the array is 2-D.
    pub fn row(&self, i: usize) -> NdResult<NDArray<A>> {
        crate::error::require_2d("row", self.ndim())?;
        self.index_axis(Axis(0), i)
    }

    /// Return a copy of the 2-D array's column `j`.
    ///
    /// **Errors** with `UnsupportedOperation` unless the array is 2-D.
    pub fn col(&self, j: usize) -> NdResult<NDArray<A>> {
        crate::error::require_2d("col", self.ndim())?;
        self.index_axis(Axis(1), j)
    }

    /// Set every element to `x`.
    pub fn fill(&mut self, x: A) -> NdResult<()> {
        self.map_inplace_checked("fill", |e| *e = x.clone())
    }

    /// Copy the elements of `rhs` into `self`; shapes must match exactly.
    pub fn assign(&mut self, rhs: &NDArray<A>) -> NdResult<()> {
        if self.shape != rhs.shape {
            return Err(shape_mismatch("assign", self.shape(), rhs.shape()));
        }
        let mut src = rhs.iter();
        self.map_inplace_checked("assign", |e| {
            if let Some(v) = src.next() {
                *e = v.clone();
            }
        })
    }

    fn map_inplace_checked<F>(&mut self, op: &str, mut f: F) -> NdResult<()>
    where
        F: FnMut(&mut A),
    {
        if self.is_empty() {
            return Ok(());
        }
        let dims = self.shape.clone();
        let coef = self.strides.clone();
        let mut off = self.offset as isize;
        let buf = self.buffer_mut(op)?;
        let mut index = vec![0; dims.ndim()];
        loop {
            f(&mut buf[off as usize]);
            if !dimension::next_for_offset(dims.as_slice(), coef.as_slice(), &mut index, &mut off) {
                break;
            }
        }
        Ok(())
    }

    /// Modify the array in place by calling `f` on every element, in
    /// logical order.
    ///
    /// **Errors** if the array is not writeable.
    pub fn map_inplace<F>(&mut self, f: F) -> NdResult<()>
    where
        F: FnMut(&mut A),
    {
        self.map_inplace_checked("map_inplace", f)
    }

    /// Modify the array in place by replacing every element with `f(x)`.
    pub fn mapv_inplace<F>(&mut self, mut f: F) -> NdResult<()>
    where
        F: FnMut(A) -> A,
    {
        self.map_inplace_checked("mapv_inplace", |e| *e = f(e.clone()))
    }

    /// Return a new C-contiguous array with `f` applied to every element by
    /// reference.
    pub fn map<'a, B, F>(&'a self, f: F) -> NDArray<B>
    where
        F: FnMut(&'a A) -> B,
    {
        NDArray::from_vec_c(self.shape.clone(), self.iter().map(f).collect())
    }

    /// Return a new C-contiguous array with `f` applied to every element by
    /// value.
    pub fn mapv<B, F>(&self, mut f: F) -> NDArray<B>
    where
        F: FnMut(A) -> B,
    {
        NDArray::from_vec_c(self.shape.clone(), self.iter().map(|x| f(x.clone())).collect())
    }

    /// Combine `self` and `rhs` elementwise with `f`.
    ///
    /// **Errors** if the shapes are not identical; no broadcasting is done.
    pub fn zip_with<B, C, F>(&self, rhs: &NDArray<B>, mut f: F) -> NdResult<NDArray<C>>
    where
        B: Element,
        F: FnMut(&A, &B) -> C,
    {
        if self.shape != rhs.shape {
            return Err(shape_mismatch("zip_with", self.shape(), rhs.shape()));
        }
        let v = self.iter().zip(rhs.iter()).map(|(a, b)| f(a, b)).collect();
        Ok(NDArray::from_vec_c(self.shape.clone(), v))
    }

    /// Fold over the elements in logical order.
    pub fn fold<'a, F, B>(&'a self, init: B, f: F) -> B
    where
        F: FnMut(B, &'a A) -> B,
    {
        self.iter().fold(init, f)
    }

    /// Sum of all elements; zero for an empty array.
    pub fn sum(&self) -> A
    where
        A: Zero + Clone,
    {
        self.fold(A::zero(), |acc, x| acc + x.clone())
    }

    /// Product of all elements; one for an empty array.
    pub fn product(&self) -> A
    where
        A: One + Clone,
    {
        self.fold(A::one(), |acc, x| acc * x.clone())
    }

    /// Convert every element to `B` with `as` semantics.
    pub fn astype<B>(&self) -> NDArray<B>
    where
        A: AsPrimitive<B>,
        B: Element + Copy,
    {
        self.mapv(|x| x.as_())
    }
}

impl<A, const N: usize> Index<[usize; N]> for NDArray<A> {
    type Output = A;

    /// **Panics** if the index is out of bounds.
    fn index(&self, index: [usize; N]) -> &A {
        ndassert!(N == self.ndim(), "index: {} coordinates for an array of {} axes", N, self.ndim());
        for (axis, (&i, &d)) in index.iter().zip(self.shape()).enumerate() {
            if i >= d {
                panic!("index: index {} is out of bounds for axis {} with size {}", i, axis, d);
            }
        }
        &self.data.as_slice()[self.position(&index)]
    }
}

impl<A: Clone, const N: usize> IndexMut<[usize; N]> for NDArray<A> {
    /// **Panics** if the index is out of bounds or the array is a read-only
    /// view.
    fn index_mut(&mut self, index: [usize; N]) -> &mut A {
        ndassert!(N == self.ndim(), "index: {} coordinates for an array of {} axes", N, self.ndim());
        for (axis, (&i, &d)) in index.iter().zip(self.shape()).enumerate() {
            if i >= d {
                panic!("index: index {} is out of bounds for axis {} with size {}", i, axis, d);
            }
        }
        let pos = self.position(&index);
        &mut expect_ok!(self.buffer_mut("index_mut"))[pos]
    }
}
