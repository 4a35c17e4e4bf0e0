// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::{from_kind, index_out_of_bounds, ArrayError, ErrorKind};

/// A slice (range with step size) of one axis.
///
/// Bounds are signed so that negative values can be *rejected* with a
/// descriptive error: negative indexing is not supported. `None` bounds
/// default to the start and the end of the axis.
///
/// `Slice::new(None, None, 1)` is the full range of an axis, also written
/// `Slice::from(..)`. `Slice::from(a..b).step_by(2)` is every second element
/// from `a` until `b`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slice {
    pub start: Option<isize>,
    pub end: Option<isize>,
    pub step: isize,
}

impl Slice {
    /// Create a new `Slice` with the given extents.
    ///
    /// See also the `From` impls, converting from ranges; for example
    /// `Slice::from(i..)` or `Slice::from(j..k)`.
    pub fn new(start: Option<isize>, end: Option<isize>, step: isize) -> Slice {
        Slice { start, end, step }
    }

    /// The full range of an axis.
    pub fn full() -> Slice {
        Slice::new(None, None, 1)
    }

    /// Create a new `Slice` with the given step size (multiplied with the
    /// previous step size).
    #[inline]
    pub fn step_by(self, step: isize) -> Self {
        Slice {
            step: self.step * step,
            ..self
        }
    }

    /// Validate this slice against an axis of length `len` and resolve the
    /// omitted bounds.
    ///
    /// Rejects a zero or negative step, negative bounds, `start >= len`,
    /// `end > len` and `start >= end`; nothing is clamped. Omitted bounds on
    /// an empty axis resolve to an empty selection.
    pub fn adjust(&self, axis: usize, len: usize) -> Result<AdjustedSlice, ArrayError> {
        if self.step == 0 {
            return Err(invalid(axis, "step must not be zero".to_string()));
        }
        if self.step < 0 {
            return Err(invalid(
                axis,
                format!("step {} is negative; negative steps are not supported", self.step),
            ));
        }
        if let Some(s) = self.start {
            if s < 0 {
                return Err(invalid(
                    axis,
                    format!("start {} is negative; negative indices are not supported", s),
                ));
            }
        }
        if let Some(e) = self.end {
            if e < 0 {
                return Err(invalid(
                    axis,
                    format!("end {} is negative; negative indices are not supported", e),
                ));
            }
        }
        if len == 0 && self.start.is_none() && self.end.is_none() {
            return Ok(AdjustedSlice {
                start: 0,
                end: 0,
                step: self.step as usize,
            });
        }
        let start = self.start.unwrap_or(0) as usize;
        let end = self.end.map_or(len, |e| e as usize);
        if start >= len {
            return Err(invalid(
                axis,
                format!("start {} is out of range for axis of length {}", start, len),
            ));
        }
        if end > len {
            return Err(invalid(
                axis,
                format!("end {} is out of range for axis of length {}", end, len),
            ));
        }
        if start >= end {
            return Err(invalid(
                axis,
                format!("start {} must be less than end {}", start, end),
            ));
        }
        Ok(AdjustedSlice {
            start,
            end,
            step: self.step as usize,
        })
    }
}

fn invalid(axis: usize, what: String) -> ArrayError {
    from_kind(ErrorKind::InvalidSliceSpec, format!("slice of axis {}: {}", axis, what))
}

/// A validated slice with all bounds resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AdjustedSlice {
    pub start: usize,
    pub end: usize,
    pub step: usize,
}

impl AdjustedSlice {
    /// Number of elements selected, as in `len(range(start, end, step))`.
    #[inline]
    pub fn len(&self) -> usize {
        if self.end <= self.start {
            0
        } else {
            (self.end - self.start - 1) / self.step + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Selection along one axis: a range with step, which keeps the axis, or a
/// single index, which removes it from the result.
///
/// See also the [`s![]`](macro.s.html) macro for a convenient way to build
/// a list of selectors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AxisSelector {
    Range(Slice),
    Index(isize),
}

impl AxisSelector {
    /// Returns `true` if `self` is a `Range` value.
    pub fn is_range(&self) -> bool {
        matches!(self, AxisSelector::Range(_))
    }

    /// Returns `true` if `self` is an `Index` value.
    pub fn is_index(&self) -> bool {
        matches!(self, AxisSelector::Index(_))
    }

    /// Returns a new selector with the given step size (multiplied with the
    /// previous step size). Indices are unaffected.
    #[inline]
    pub fn step_by(self, step: isize) -> Self {
        match self {
            AxisSelector::Range(s) => AxisSelector::Range(s.step_by(step)),
            AxisSelector::Index(i) => AxisSelector::Index(i),
        }
    }

    /// Resolve against an axis of length `len`. An index becomes a
    /// unit-length range.
    pub(crate) fn adjust(&self, axis: usize, len: usize) -> Result<AdjustedSlice, ArrayError> {
        match *self {
            AxisSelector::Range(s) => s.adjust(axis, len),
            AxisSelector::Index(i) => {
                if i < 0 || i as usize >= len {
                    return Err(index_out_of_bounds("index", i, Some(axis), len));
                }
                Ok(AdjustedSlice {
                    start: i as usize,
                    end: i as usize + 1,
                    step: 1,
                })
            }
        }
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(s) = self.start {
            write!(f, "{}", s)?;
        }
        write!(f, ":")?;
        if let Some(e) = self.end {
            write!(f, "{}", e)?;
        }
        if self.step != 1 {
            write!(f, ":{}", self.step)?;
        }
        Ok(())
    }
}

impl fmt::Display for AxisSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AxisSelector::Index(i) => write!(f, "{}", i),
            AxisSelector::Range(ref s) => s.fmt(f),
        }
    }
}

macro_rules! impl_slice_from_index_type {
    ($index:ty) => {
        impl From<Range<$index>> for Slice {
            #[inline]
            fn from(r: Range<$index>) -> Slice {
                Slice::new(Some(r.start as isize), Some(r.end as isize), 1)
            }
        }

        impl From<RangeFrom<$index>> for Slice {
            #[inline]
            fn from(r: RangeFrom<$index>) -> Slice {
                Slice::new(Some(r.start as isize), None, 1)
            }
        }

        impl From<RangeTo<$index>> for Slice {
            #[inline]
            fn from(r: RangeTo<$index>) -> Slice {
                Slice::new(None, Some(r.end as isize), 1)
            }
        }

        impl From<Range<$index>> for AxisSelector {
            #[inline]
            fn from(r: Range<$index>) -> AxisSelector {
                AxisSelector::Range(Slice::from(r))
            }
        }

        impl From<RangeFrom<$index>> for AxisSelector {
            #[inline]
            fn from(r: RangeFrom<$index>) -> AxisSelector {
                AxisSelector::Range(Slice::from(r))
            }
        }

        impl From<RangeTo<$index>> for AxisSelector {
            #[inline]
            fn from(r: RangeTo<$index>) -> AxisSelector {
                AxisSelector::Range(Slice::from(r))
            }
        }

        impl From<$index> for AxisSelector {
            #[inline]
            fn from(i: $index) -> AxisSelector {
                AxisSelector::Index(i as isize)
            }
        }
    };
}

impl_slice_from_index_type!(isize);
impl_slice_from_index_type!(usize);
impl_slice_from_index_type!(i32);

impl From<RangeFull> for Slice {
    #[inline]
    fn from(_: RangeFull) -> Slice {
        Slice::full()
    }
}

impl From<RangeFull> for AxisSelector {
    #[inline]
    fn from(_: RangeFull) -> AxisSelector {
        AxisSelector::Range(Slice::full())
    }
}

impl From<Slice> for AxisSelector {
    #[inline]
    fn from(s: Slice) -> AxisSelector {
        AxisSelector::Range(s)
    }
}

/// Build an array of [`AxisSelector`]s for the slicing methods.
///
/// Each argument is a range (`a..b`, `a..`, `..b`, `..`), optionally
/// followed by `;step`, or a plain integer index.
///
/// ```
/// use ndstrided::{s, NDArray};
///
/// let a = NDArray::<f64>::zeros((4, 5));
/// let b = a.slice(&s![1..3, ..;2]).unwrap();
/// assert_eq!(b.shape(), &[2, 3]);
/// let row = a.slice(&s![2, ..]).unwrap();
/// assert_eq!(row.shape(), &[5]);
/// ```
#[macro_export]
macro_rules! s(
    (@parse [$($stack:tt)*] $r:expr;$s:expr) => {
        [$($stack)* $crate::s!(@convert $r, $s)]
    };
    (@parse [$($stack:tt)*] $r:expr) => {
        [$($stack)* $crate::s!(@convert $r)]
    };
    (@parse [$($stack:tt)*] $r:expr;$s:expr ,) => {
        [$($stack)* $crate::s!(@convert $r, $s)]
    };
    (@parse [$($stack:tt)*] $r:expr ,) => {
        [$($stack)* $crate::s!(@convert $r)]
    };
    (@parse [$($stack:tt)*] $r:expr;$s:expr, $($t:tt)*) => {
        $crate::s![@parse [$($stack)* $crate::s!(@convert $r, $s),] $($t)*]
    };
    (@parse [$($stack:tt)*] $r:expr, $($t:tt)*) => {
        $crate::s![@parse [$($stack)* $crate::s!(@convert $r),] $($t)*]
    };
    (@convert $r:expr) => {
        <$crate::AxisSelector as ::std::convert::From<_>>::from($r)
    };
    (@convert $r:expr, $s:expr) => {
        <$crate::AxisSelector as ::std::convert::From<_>>::from($r).step_by($s as isize)
    };
    () => {
        [$crate::AxisSelector::Range($crate::Slice::full()); 0]
    };
    ($($t:tt)*) => {
        $crate::s![@parse [] $($t)*]
    };
);
