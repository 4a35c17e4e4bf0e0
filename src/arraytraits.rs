// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::hash;
use std::iter::FromIterator;

use crate::{Matrix, NDArray};

/// Return `true` if the array shapes and all elements of `self` and
/// `rhs` are equal. Return `false` otherwise.
///
/// Elements are compared in logical order, so the memory layout, offset
/// and ownership of the two arrays do not matter.
impl<A, B> PartialEq<NDArray<B>> for NDArray<A>
where
    A: PartialEq<B>,
{
    fn eq(&self, rhs: &NDArray<B>) -> bool {
        self.shape() == rhs.shape() && self.iter().zip(rhs.iter()).all(|(a, b)| a == b)
    }
}

impl<A: Eq> Eq for NDArray<A> {}

impl<A, B> PartialEq<Matrix<B>> for Matrix<A>
where
    A: PartialEq<B>,
{
    fn eq(&self, rhs: &Matrix<B>) -> bool {
        self.dim() == rhs.dim() && self.as_slice() == rhs.as_slice()
    }
}

impl<A: Eq> Eq for Matrix<A> {}

/// Create a one-dimensional array from an iterator.
impl<A> FromIterator<A> for NDArray<A> {
    fn from_iter<I>(iterable: I) -> NDArray<A>
    where
        I: IntoIterator<Item = A>,
    {
        NDArray::from_vec1(iterable.into_iter().collect())
    }
}

impl<A: hash::Hash> hash::Hash for NDArray<A> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.shape().hash(state);
        for elt in self.iter() {
            elt.hash(state)
        }
    }
}
