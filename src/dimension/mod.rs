// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Shape, strides and the index arithmetic shared by every array path.

pub use self::axis::Axis;
pub use self::shape::{IntoShape, Shape};
pub use self::strides::Strides;

mod axis;
mod shape;
mod strides;

/// Return true if `strides` are the canonical row-major strides of `shape`.
pub fn is_c_contiguous(shape: &Shape, strides: &Strides) -> bool {
    *strides == Strides::c_order(shape)
}

/// Return true if `strides` are the canonical column-major strides of `shape`.
pub fn is_f_contiguous(shape: &Shape, strides: &Strides) -> bool {
    *strides == Strides::f_order(shape)
}

/// Advance `index` to the next coordinate of `dims` in odometer order: the
/// last axis increments first and carries into the previous axis when it
/// overflows.
///
/// Returns `false` once the first axis overflows, i.e. iteration is done;
/// `index` is then reset to all zeros.
#[inline]
pub(crate) fn next_for(dims: &[usize], index: &mut [usize]) -> bool {
    for (&dim, ix) in dims.iter().zip(index.iter_mut()).rev() {
        *ix += 1;
        if *ix == dim {
            *ix = 0;
        } else {
            return true;
        }
    }
    false
}

/// Odometer step that also maintains a running buffer offset, so the
/// traversal never recomputes the full dot product of index and strides.
///
/// `coef[axis]` is the offset delta of one step along `axis`.
#[inline]
pub(crate) fn next_for_offset(dims: &[usize], coef: &[isize], index: &mut [usize], offset: &mut isize) -> bool {
    for axis in (0..dims.len()).rev() {
        index[axis] += 1;
        *offset += coef[axis];
        if index[axis] == dims[axis] {
            *offset -= coef[axis] * dims[axis] as isize;
            index[axis] = 0;
        } else {
            return true;
        }
    }
    false
}

/// Range of buffer offsets, relative to the first element, touched by an
/// array of this geometry: `(min, max)` inclusive. `None` for empty arrays.
pub(crate) fn offset_span(shape: &Shape, strides: &Strides) -> Option<(isize, isize)> {
    if shape.size() == 0 {
        return None;
    }
    let mut lo = 0isize;
    let mut hi = 0isize;
    for (&d, &s) in shape.as_slice().iter().zip(strides.as_slice()) {
        let reach = (d as isize - 1) * s;
        if reach < 0 {
            lo += reach;
        } else {
            hi += reach;
        }
    }
    Some((lo, hi))
}

/// Normalize a possibly negative index against `len`; `None` if out of range.
#[inline]
pub(crate) fn normalize_index(index: isize, len: usize) -> Option<usize> {
    let i = if index < 0 { index + len as isize } else { index };
    if i >= 0 && (i as usize) < len {
        Some(i as usize)
    } else {
        None
    }
}
