// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::error::{from_kind, ArrayError, ErrorKind};

/// Memory order of an array.
///
/// - `C` (row major): the rightmost axis varies fastest in memory; the stride
///   of an axis is the product of the extents to its right.
/// - `F` (column major, "Fortran"): the leftmost axis varies fastest; the
///   stride of an axis is the product of the extents to its left.
///
/// The sequence 1, 2, 3, 4, 5, 6 laid out as a 2 × 3 array reads
///
/// ```text
/// C:  1  2  3      F:  1  3  5
///     4  5  6          2  4  6
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// Row major or "C" order
    #[default]
    C,
    /// Column major or "F" order
    F,
}

impl Order {
    /// Return true if input is `Order::C`
    #[inline]
    pub fn is_row_major(self) -> bool {
        self == Order::C
    }

    /// Return true if input is `Order::F`
    #[inline]
    pub fn is_column_major(self) -> bool {
        self == Order::F
    }

    /// Return the transpose: C becomes F and vice versa.
    #[inline]
    pub fn transpose(self) -> Order {
        match self {
            Order::C => Order::F,
            Order::F => Order::C,
        }
    }

    /// Parse the single-letter NumPy order code (`'C'` or `'F'`).
    pub fn from_char(c: char) -> Result<Order, ArrayError> {
        match c {
            'C' | 'c' => Ok(Order::C),
            'F' | 'f' => Ok(Order::F),
            other => Err(from_kind(
                ErrorKind::UnsupportedOperation,
                format!("unknown memory order {:?}, expected 'C' or 'F'", other),
            )),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Order::C => "C",
            Order::F => "F",
        })
    }
}
