// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Element, lane and sub-array iterators.

use std::iter::FusedIterator;
use std::slice::Iter as SliceIter;

use crate::dimension::{self, Axis};
use crate::error::{index_out_of_bounds, NdResult};
use crate::{Element, NDArray, Order};

/// Base for array iterators: an odometer over `dims` that tracks the buffer
/// position of the current coordinate.
///
/// Iterator element type is `&'a A`.
#[derive(Clone)]
struct Baseiter<'a, A> {
    data: &'a [A],
    dims: Vec<usize>,
    strides: Vec<isize>,
    pos: isize,
    index: Option<Vec<usize>>,
    remaining: usize,
}

impl<'a, A> Baseiter<'a, A> {
    fn new(data: &'a [A], offset: usize, dims: Vec<usize>, strides: Vec<isize>) -> Self {
        let remaining = dims.iter().product();
        let index = if remaining == 0 { None } else { Some(vec![0; dims.len()]) };
        Baseiter {
            data,
            dims,
            strides,
            pos: offset as isize,
            index,
            remaining,
        }
    }

    /// Advance, returning the coordinate and position that were current.
    #[inline]
    fn step(&mut self) -> Option<(Vec<usize>, usize)> {
        let index = self.index.as_mut()?;
        let current = (index.clone(), self.pos as usize);
        if !dimension::next_for_offset(&self.dims, &self.strides, index, &mut self.pos) {
            self.index = None;
        }
        self.remaining -= 1;
        Some(current)
    }

    #[inline]
    fn next_pos(&mut self) -> Option<usize> {
        let index = self.index.as_mut()?;
        let pos = self.pos as usize;
        if !dimension::next_for_offset(&self.dims, &self.strides, index, &mut self.pos) {
            self.index = None;
        }
        self.remaining -= 1;
        Some(pos)
    }
}

impl<'a, A> Iterator for Baseiter<'a, A> {
    type Item = &'a A;

    #[inline]
    fn next(&mut self) -> Option<&'a A> {
        let data = self.data;
        self.next_pos().map(|p| &data[p])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[derive(Clone)]
enum ElementsRepr<'a, A> {
    Slice(SliceIter<'a, A>),
    Counted(Baseiter<'a, A>),
}

/// An iterator over the elements of an array, in logical (row-major) order.
///
/// Iterator element type is `&'a A`.
///
/// See [`.iter()`](NDArray::iter) for more information.
#[derive(Clone)]
pub struct Iter<'a, A> {
    inner: ElementsRepr<'a, A>,
}

impl<'a, A> Iterator for Iter<'a, A> {
    type Item = &'a A;

    #[inline]
    fn next(&mut self) -> Option<&'a A> {
        match &mut self.inner {
            ElementsRepr::Slice(it) => it.next(),
            ElementsRepr::Counted(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            ElementsRepr::Slice(it) => it.size_hint(),
            ElementsRepr::Counted(it) => it.size_hint(),
        }
    }
}

impl<'a, A> ExactSizeIterator for Iter<'a, A> {}
impl<'a, A> FusedIterator for Iter<'a, A> {}

/// An iterator over the elements of an array in a chosen traversal order.
///
/// See [`.nditer()`](NDArray::nditer) for more information.
#[derive(Clone)]
pub struct NdIter<'a, A> {
    inner: Baseiter<'a, A>,
}

impl<'a, A> Iterator for NdIter<'a, A> {
    type Item = &'a A;

    #[inline]
    fn next(&mut self) -> Option<&'a A> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, A> ExactSizeIterator for NdIter<'a, A> {}

/// An iterator over the coordinates and elements of an array.
///
/// See [`.indexed_iter()`](NDArray::indexed_iter) for more information.
#[derive(Clone)]
pub struct IndexedIter<'a, A> {
    inner: Baseiter<'a, A>,
}

impl<'a, A> Iterator for IndexedIter<'a, A> {
    type Item = (Vec<usize>, &'a A);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let data = self.inner.data;
        self.inner.step().map(|(ix, p)| (ix, &data[p]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, A> ExactSizeIterator for IndexedIter<'a, A> {}

/// An iterator over the 1-D lanes of an array parallel to one axis.
///
/// Each lane is yielded as an owned 1-D array. Lanes are visited in logical
/// order of the remaining axes.
///
/// See [`.iter_along_axis()`](NDArray::iter_along_axis) for more information.
pub struct LanesIter<'a, A> {
    outer: Baseiter<'a, A>,
    lane_len: usize,
    lane_stride: isize,
}

impl<'a, A: Clone> Iterator for LanesIter<'a, A> {
    type Item = NDArray<A>;

    fn next(&mut self) -> Option<NDArray<A>> {
        let start = self.outer.next_pos()? as isize;
        let data = self.outer.data;
        let lane = (0..self.lane_len)
            .map(|i| data[(start + i as isize * self.lane_stride) as usize].clone())
            .collect();
        Some(NDArray::from_vec1(lane))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.outer.size_hint()
    }
}

impl<'a, A: Clone> ExactSizeIterator for LanesIter<'a, A> {}

/// An iterator over the sub-arrays obtained by fixing the coordinate of one
/// axis, for each coordinate in turn.
///
/// See [`.iter_over_dimension()`](NDArray::iter_over_dimension) for more
/// information.
pub struct AxisIter<'a, A> {
    array: &'a NDArray<A>,
    axis: Axis,
    index: usize,
    len: usize,
}

impl<'a, A: Element> Iterator for AxisIter<'a, A> {
    type Item = NDArray<A>;

    fn next(&mut self) -> Option<NDArray<A>> {
        if self.index >= self.len {
            return None;
        }
        let sub = self.array.index_axis(self.axis, self.index).ok();
        self.index += 1;
        sub
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl<'a, A: Element> ExactSizeIterator for AxisIter<'a, A> {}

impl<A> NDArray<A> {
    /// Return an iterator of references to the elements of the array, in
    /// logical order: the last axis varies fastest, whatever the memory
    /// layout.
    pub fn iter(&self) -> Iter<'_, A> {
        let inner = match self.as_slice() {
            Some(s) => ElementsRepr::Slice(s.iter()),
            None => ElementsRepr::Counted(self.base_iter()),
        };
        Iter { inner }
    }

    fn base_iter(&self) -> Baseiter<'_, A> {
        Baseiter::new(
            self.data.as_slice(),
            self.offset,
            self.shape().to_vec(),
            self.strides().to_vec(),
        )
    }

    /// Return an iterator over the elements in the given traversal order.
    ///
    /// `Order::C` is logical order; `Order::F` lets the first axis vary
    /// fastest. For an F-contiguous array `nditer(Order::F)` visits the
    /// buffer front to back.
    pub fn nditer(&self, order: Order) -> NdIter<'_, A> {
        let inner = match order {
            Order::C => self.base_iter(),
            Order::F => Baseiter::new(
                self.data.as_slice(),
                self.offset,
                self.shape().iter().rev().cloned().collect(),
                self.strides().iter().rev().cloned().collect(),
            ),
        };
        NdIter { inner }
    }

    /// Return an iterator of coordinates and references to the elements,
    /// in logical order.
    pub fn indexed_iter(&self) -> IndexedIter<'_, A> {
        IndexedIter {
            inner: self.base_iter(),
        }
    }

    /// Return an iterator over the 1-D lanes parallel to `axis`.
    ///
    /// For a 2-D array, `iter_along_axis(Axis(1))` yields the rows and
    /// `iter_along_axis(Axis(0))` the columns.
    ///
    /// **Errors** if `axis` is out of bounds.
    pub fn iter_along_axis(&self, axis: Axis) -> NdResult<LanesIter<'_, A>> {
        let ax = axis.index();
        if ax >= self.ndim() {
            return Err(index_out_of_bounds("iter_along_axis", ax as isize, None, self.ndim()));
        }
        let mut dims = self.shape().to_vec();
        let mut strides = self.strides().to_vec();
        let lane_len = dims.remove(ax);
        let lane_stride = strides.remove(ax);
        // an empty axis still yields one (empty) lane per outer coordinate
        let outer = Baseiter::new(self.data.as_slice(), self.offset, dims, strides);
        Ok(LanesIter {
            outer,
            lane_len,
            lane_stride,
        })
    }

    /// Return an iterator over the sub-arrays at each index of `axis`; each
    /// has one dimension less than `self`.
    ///
    /// **Errors** if `axis` is out of bounds.
    pub fn iter_over_dimension(&self, axis: Axis) -> NdResult<AxisIter<'_, A>> {
        if axis.index() >= self.ndim() {
            return Err(index_out_of_bounds(
                "iter_over_dimension",
                axis.index() as isize,
                None,
                self.ndim(),
            ));
        }
        Ok(AxisIter {
            array: self,
            axis,
            index: 0,
            len: self.shape[axis.index()],
        })
    }
}

impl<'a, A> IntoIterator for &'a NDArray<A> {
    type Item = &'a A;
    type IntoIter = Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
