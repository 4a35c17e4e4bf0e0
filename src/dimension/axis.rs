// Copyright 2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// An axis index.
///
/// Axis *0* is the array's outermost (slowest varying in C order) axis and
/// *ndim - 1* the innermost. Axis arguments use this type so that they are
/// not confused with element indices.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Axis(pub usize);

impl Axis {
    /// Return the index of the axis.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for Axis {
    #[inline]
    fn from(i: usize) -> Axis {
        Axis(i)
    }
}
