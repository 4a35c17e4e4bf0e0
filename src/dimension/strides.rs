// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::ops::Index;

use super::Shape;
use crate::error::{index_out_of_bounds, NdResult};

/// Per-axis buffer offset deltas of an array, in elements.
///
/// Strides are held independently of the shape: a view produced by a
/// stepped slice or an axis permutation has strides that are not the
/// canonical ones for its shape.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Strides(Vec<isize>);

impl Strides {
    pub fn new(strides: Vec<isize>) -> Strides {
        Strides(strides)
    }

    /// Row-major strides for `shape`: the stride of an axis is the product
    /// of the extents to its right.
    pub fn c_order(shape: &Shape) -> Strides {
        // Shape (a, b, c) => Give strides (b * c, c, 1)
        let dims = shape.as_slice();
        let mut strides = vec![0isize; dims.len()];
        let mut cum_prod = 1isize;
        for (s, &d) in strides.iter_mut().zip(dims).rev() {
            *s = cum_prod;
            cum_prod *= d.max(1) as isize;
        }
        Strides(strides)
    }

    /// Column-major strides for `shape`: the stride of an axis is the
    /// product of the extents to its left.
    pub fn f_order(shape: &Shape) -> Strides {
        let dims = shape.as_slice();
        let mut strides = vec![0isize; dims.len()];
        let mut cum_prod = 1isize;
        for (s, &d) in strides.iter_mut().zip(dims) {
            *s = cum_prod;
            cum_prod *= d.max(1) as isize;
        }
        Strides(strides)
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[isize] {
        &self.0
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [isize] {
        &mut self.0
    }

    pub fn into_vec(self) -> Vec<isize> {
        self.0
    }

    /// Return new strides with `stride` inserted before position `axis`.
    pub fn join(&self, axis: usize, stride: isize) -> NdResult<Strides> {
        if axis > self.ndim() {
            return Err(index_out_of_bounds("Strides::join", axis as isize, None, self.ndim() + 1));
        }
        let mut v = self.0.clone();
        v.insert(axis, stride);
        Ok(Strides(v))
    }

    /// Return new strides with `axis` removed.
    pub fn pop(&self, axis: usize) -> NdResult<Strides> {
        if axis >= self.ndim() {
            return Err(index_out_of_bounds("Strides::pop", axis as isize, None, self.ndim()));
        }
        let mut v = self.0.clone();
        v.remove(axis);
        Ok(Strides(v))
    }

    /// Buffer offset of `coords` relative to the array's first element.
    #[inline]
    pub fn offset_of(&self, coords: &[usize]) -> isize {
        debug_assert_eq!(coords.len(), self.ndim());
        coords
            .iter()
            .zip(&self.0)
            .fold(0, |acc, (&i, &s)| acc + i as isize * s)
    }
}

impl Index<usize> for Strides {
    type Output = isize;

    #[inline]
    fn index(&self, axis: usize) -> &isize {
        &self.0[axis]
    }
}

impl fmt::Debug for Strides {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl PartialEq<[isize]> for Strides {
    fn eq(&self, rhs: &[isize]) -> bool {
        self.0 == rhs
    }
}

impl<const N: usize> PartialEq<[isize; N]> for Strides {
    fn eq(&self, rhs: &[isize; N]) -> bool {
        self.0 == rhs
    }
}

impl From<Vec<isize>> for Strides {
    fn from(v: Vec<isize>) -> Strides {
        Strides(v)
    }
}
