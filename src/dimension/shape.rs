// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::ops::Index;

use super::Strides;
use crate::error::{from_kind, index_out_of_bounds, ArrayError, ErrorKind, NdResult};
use crate::Order;

/// Per-axis extents of an array.
///
/// The number of axes is the array's `ndim`; the product of the extents
/// (cached) is its `size`. A shape with no axes describes a scalar-valued
/// (0-D) array and has size 1.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    dims: Vec<usize>,
    size: usize,
}

impl Shape {
    /// Create a shape from its extents.
    pub fn new(dims: Vec<usize>) -> Shape {
        let size = dims.iter().product();
        Shape { dims, size }
    }

    /// The shape of a 0-D array.
    pub fn scalar() -> Shape {
        Shape::new(Vec::new())
    }

    /// Create a shape from signed extents, rejecting negative values.
    pub fn from_signed(dims: &[isize]) -> NdResult<Shape> {
        let mut out = Vec::with_capacity(dims.len());
        for (axis, &d) in dims.iter().enumerate() {
            if d < 0 {
                return Err(from_kind(
                    ErrorKind::InvalidSliceSpec,
                    format!("Shape: extent {} of axis {} is negative", d, axis),
                ));
            }
            out.push(d as usize);
        }
        Ok(Shape::new(out))
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Number of elements (product of the extents).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Alias of [`size`](Shape::size).
    #[inline]
    pub fn size_of_array(&self) -> usize {
        self.size
    }

    /// The extents as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.dims
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.dims
    }

    /// Set the extent of `axis`, updating the cached size.
    ///
    /// **Panics** if `axis` is out of bounds.
    pub fn set(&mut self, axis: usize, extent: usize) {
        self.dims[axis] = extent;
        self.size = self.dims.iter().product();
    }

    /// Canonical strides of this shape for the given memory order.
    pub fn default_strides(&self, order: Order) -> Strides {
        match order {
            Order::C => Strides::c_order(self),
            Order::F => Strides::f_order(self),
        }
    }

    /// Return a new shape with an axis of length `extent` inserted before
    /// position `axis`.
    pub fn join(&self, axis: usize, extent: usize) -> NdResult<Shape> {
        if axis > self.ndim() {
            return Err(index_out_of_bounds("Shape::join", axis as isize, None, self.ndim() + 1));
        }
        let mut dims = self.dims.clone();
        dims.insert(axis, extent);
        Ok(Shape::new(dims))
    }

    /// Return a new shape with `axis` removed.
    pub fn pop(&self, axis: usize) -> NdResult<Shape> {
        if axis >= self.ndim() {
            return Err(index_out_of_bounds("Shape::pop", axis as isize, None, self.ndim()));
        }
        let mut dims = self.dims.clone();
        dims.remove(axis);
        Ok(Shape::new(dims))
    }

    /// Row-major linear index of `coords`. Coordinates must be in bounds.
    pub fn ravel_index(&self, coords: &[usize]) -> usize {
        debug_assert_eq!(coords.len(), self.ndim());
        coords
            .iter()
            .zip(&self.dims)
            .fold(0, |acc, (&i, &d)| acc * d + i)
    }

    /// Coordinates of the row-major linear index `index`.
    pub fn unravel_index(&self, mut index: usize) -> Vec<usize> {
        let mut coords = vec![0; self.ndim()];
        for (c, &d) in coords.iter_mut().zip(&self.dims).rev() {
            if d == 0 {
                continue;
            }
            *c = index % d;
            index /= d;
        }
        coords
    }
}

impl Index<usize> for Shape {
    type Output = usize;

    #[inline]
    fn index(&self, axis: usize) -> &usize {
        &self.dims[axis]
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.dims.fmt(f)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("(")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", d)?;
        }
        if self.dims.len() == 1 {
            f.write_str(",")?;
        }
        f.write_str(")")
    }
}

impl PartialEq<[usize]> for Shape {
    fn eq(&self, rhs: &[usize]) -> bool {
        self.dims == rhs
    }
}

impl<const N: usize> PartialEq<[usize; N]> for Shape {
    fn eq(&self, rhs: &[usize; N]) -> bool {
        self.dims == rhs
    }
}

/// Argument conversion into a [`Shape`].
///
/// Implemented for `usize` (1-D), tuples of `usize`, arrays and slices of
/// `usize`, `Vec<usize>` and `Shape` itself. `()` is the 0-D shape.
pub trait IntoShape {
    fn into_shape(self) -> Shape;
}

impl IntoShape for Shape {
    #[inline]
    fn into_shape(self) -> Shape {
        self
    }
}

impl<'a> IntoShape for &'a Shape {
    #[inline]
    fn into_shape(self) -> Shape {
        self.clone()
    }
}

impl IntoShape for usize {
    #[inline]
    fn into_shape(self) -> Shape {
        Shape::new(vec![self])
    }
}

impl IntoShape for Vec<usize> {
    #[inline]
    fn into_shape(self) -> Shape {
        Shape::new(self)
    }
}

impl<'a> IntoShape for &'a [usize] {
    #[inline]
    fn into_shape(self) -> Shape {
        Shape::new(self.to_vec())
    }
}

impl<const N: usize> IntoShape for [usize; N] {
    #[inline]
    fn into_shape(self) -> Shape {
        Shape::new(self.to_vec())
    }
}

impl IntoShape for () {
    #[inline]
    fn into_shape(self) -> Shape {
        Shape::scalar()
    }
}

macro_rules! tuple_into_shape {
    ($($name:ident)+) => {
        impl IntoShape for ($(tuple_into_shape!(@usize $name),)+) {
            #[allow(non_snake_case)]
            #[inline]
            fn into_shape(self) -> Shape {
                let ($($name,)+) = self;
                Shape::new(vec![$($name),+])
            }
        }
    };
    (@usize $name:ident) => { usize };
}

tuple_into_shape!(a);
tuple_into_shape!(a b);
tuple_into_shape!(a b c);
tuple_into_shape!(a b c d);
tuple_into_shape!(a b c d e);
tuple_into_shape!(a b c d e f);

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Shape {
        Shape::new(dims)
    }
}

impl<'a> From<&'a [usize]> for Shape {
    fn from(dims: &'a [usize]) -> Shape {
        Shape::new(dims.to_vec())
    }
}

impl TryFrom<&[isize]> for Shape {
    type Error = ArrayError;

    fn try_from(dims: &[isize]) -> Result<Shape, ArrayError> {
        Shape::from_signed(dims)
    }
}
