// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Constructor methods for NDArray.

use std::ptr::NonNull;

use num_traits::{Num, One, Zero};

use crate::dimension::{self, IntoShape, Shape, Strides};
use crate::error::{from_kind, shape_mismatch, ArrayError, ErrorKind, NdResult};
use crate::{Buffer, Element, Flags, NDArray, Order, OrderedShape, ShapeBuilder};

/// Buffer length needed to hold every element of the geometry, or an error
/// if some element would fall before the buffer start.
fn required_len(offset: usize, shape: &Shape, strides: &Strides) -> NdResult<usize> {
    if strides.ndim() != shape.ndim() {
        return Err(from_kind(
            ErrorKind::DimensionalityMismatch,
            format!(
                "strides {:?} have {} entries for a shape {:?} of {} dimensions",
                strides,
                strides.ndim(),
                shape,
                shape.ndim()
            ),
        ));
    }
    match dimension::offset_span(shape, strides) {
        None => Ok(offset),
        Some((lo, hi)) => {
            if (offset as isize) + lo < 0 {
                return Err(from_kind(
                    ErrorKind::IndexOutOfBounds,
                    format!(
                        "offset {} with strides {:?} reaches {} elements before the buffer start",
                        offset, strides, -(offset as isize + lo)
                    ),
                ));
            }
            Ok((offset as isize + hi) as usize + 1)
        }
    }
}

impl<A> NDArray<A> {
    /// Assemble an array from its parts, classifying the layout.
    pub(crate) fn from_buffer(
        data: Buffer<A>,
        offset: usize,
        shape: Shape,
        strides: Strides,
        owndata: bool,
        writeable: bool,
    ) -> Self {
        debug_assert_eq!(shape.ndim(), strides.ndim());
        let flags = Flags::classify(&shape, &strides, owndata, writeable);
        NDArray {
            data,
            offset,
            shape,
            strides,
            flags,
        }
    }

    /// An owning C-contiguous array over `v`, whose elements are in logical
    /// (row-major) order.
    pub(crate) fn from_vec_c(shape: Shape, v: Vec<A>) -> Self {
        debug_assert_eq!(shape.size(), v.len());
        let strides = Strides::c_order(&shape);
        Self::from_buffer(Buffer::from_vec(v), 0, shape, strides, true, true)
    }

    /// Create an array over `v` with the given shape and memory order.
    ///
    /// The elements of `v` are taken in memory order: row major for C,
    /// column major for F.
    ///
    /// ```
    /// use ndstrided::{NDArray, ShapeBuilder};
    ///
    /// let a = NDArray::from_vec((2, 3).f(), vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(a.item_at(&[0, 1]).unwrap(), 3);
    /// ```
    ///
    /// **Errors** if the length of `v` is not the size of the shape.
    pub fn from_vec<Sh: ShapeBuilder>(shape: Sh, v: Vec<A>) -> NdResult<Self> {
        let OrderedShape { shape, order } = shape.into_ordered();
        if shape.size() != v.len() {
            return Err(shape_mismatch("NDArray::from_vec", shape.as_slice(), &[v.len()]));
        }
        let strides = shape.default_strides(order);
        Ok(Self::from_buffer(Buffer::from_vec(v), 0, shape, strides, true, true))
    }

    /// Create a 1-D array from a vector.
    pub fn from_vec1(v: Vec<A>) -> Self {
        Self::from_vec_c(Shape::new(vec![v.len()]), v)
    }

    /// Create a 0-D array holding `x`.
    pub fn from_scalar(x: A) -> Self {
        Self::from_vec_c(Shape::scalar(), vec![x])
    }

    /// Create a view over memory the array does not own.
    ///
    /// `len` is the number of readable elements at `ptr`; the geometry
    /// (`shape`, `strides`, `offset`) is checked against it. The result has
    /// neither `OWNDATA` nor `WRITEABLE` set.
    ///
    /// ## Safety
    ///
    /// `ptr` must be valid for reads of `len` elements for as long as the
    /// returned array and every array derived from it without copying are
    /// alive, and the memory must not be mutated during that time.
    pub unsafe fn from_raw_parts(
        ptr: *const A,
        len: usize,
        shape: impl IntoShape,
        strides: Strides,
        offset: usize,
    ) -> NdResult<Self> {
        let shape = shape.into_shape();
        let ptr = NonNull::new(ptr as *mut A)
            .ok_or_else(|| from_kind(ErrorKind::UnsupportedOperation, "from_raw_parts: null pointer"))?;
        let need = required_len(offset, &shape, &strides)?;
        if need > len {
            return Err(from_kind(
                ErrorKind::IndexOutOfBounds,
                format!("from_raw_parts: geometry needs {} elements, buffer has {}", need, len),
            ));
        }
        let data = Buffer::from_raw(ptr, len);
        Ok(Self::from_buffer(data, offset, shape, strides, false, false))
    }
}

impl<A: Element> NDArray<A> {
    /// Create an array with default-valued elements.
    ///
    /// The shape argument may carry a memory order:
    /// `NDArray::<f32>::new((2, 3).f())`.
    pub fn new<Sh: ShapeBuilder>(shape: Sh) -> Self {
        Self::from_elem(shape, A::default())
    }

    /// Create an array with every element set to `elem`.
    pub fn from_elem<Sh: ShapeBuilder>(shape: Sh, elem: A) -> Self {
        let OrderedShape { shape, order } = shape.into_ordered();
        let v = vec![elem; shape.size()];
        let strides = shape.default_strides(order);
        Self::from_buffer(Buffer::from_vec(v), 0, shape, strides, true, true)
    }

    /// Alias of [`from_elem`](NDArray::from_elem).
    pub fn full<Sh: ShapeBuilder>(shape: Sh, elem: A) -> Self {
        Self::from_elem(shape, elem)
    }

    /// Create an array by calling `f` with the coordinates of every
    /// element, in logical (row-major) order.
    pub fn from_shape_fn<Sh, F>(shape: Sh, mut f: F) -> Self
    where
        Sh: ShapeBuilder,
        F: FnMut(&[usize]) -> A,
    {
        let OrderedShape { shape, order } = shape.into_ordered();
        let strides = shape.default_strides(order);
        let mut v = vec![A::default(); shape.size()];
        if !v.is_empty() {
            let mut index = vec![0; shape.ndim()];
            let mut off = 0isize;
            loop {
                v[off as usize] = f(&index);
                if !dimension::next_for_offset(shape.as_slice(), strides.as_slice(), &mut index, &mut off) {
                    break;
                }
            }
        }
        Self::from_buffer(Buffer::from_vec(v), 0, shape, strides, true, true)
    }

    /// Create an owning array with caller-chosen geometry.
    ///
    /// The buffer is allocated just large enough for `offset` and every
    /// element the strides reach, and filled with default values. Used to
    /// stage a destination whose strides and offset are computed ahead of
    /// the element copy.
    pub fn with_strides(shape: impl IntoShape, offset: usize, strides: Strides) -> NdResult<Self> {
        let shape = shape.into_shape();
        let len = required_len(offset, &shape, &strides)?;
        let data = Buffer::from_vec(vec![A::default(); len]);
        Ok(Self::from_buffer(data, offset, shape, strides, true, true))
    }

    /// Create an array from fully explicit geometry and flags.
    ///
    /// `ndim` and `size` must agree with `shape`; the flags are stored as
    /// given, without reclassifying the strides. Element values are
    /// defaults and carry no meaning.
    pub fn from_parts(shape: Shape, strides: Strides, ndim: usize, size: usize, flags: Flags) -> NdResult<Self> {
        if shape.ndim() != ndim {
            return Err(from_kind(
                ErrorKind::DimensionalityMismatch,
                format!("from_parts: ndim {} does not match shape {:?}", ndim, shape),
            ));
        }
        if shape.size() != size {
            return Err(from_kind(
                ErrorKind::ShapeMismatch,
                format!("from_parts: size {} does not match shape {:?}", size, shape),
            ));
        }
        let len = required_len(0, &shape, &strides)?;
        Ok(NDArray {
            data: Buffer::from_vec(vec![A::default(); len]),
            offset: 0,
            shape,
            strides,
            flags,
        })
    }

    /// Return a deep copy in a freshly allocated, contiguous buffer.
    ///
    /// A C- or F-contiguous source is copied verbatim and keeps its layout;
    /// any other source is gathered into C order. The copy owns its data
    /// and is writeable.
    pub fn deep_copy(&self) -> Self {
        let size = self.size();
        if let Some(order) = self.memory_order() {
            let src = &self.data.as_slice()[self.offset..self.offset + size];
            let strides = self.shape.default_strides(order);
            return Self::from_buffer(Buffer::from_vec(src.to_vec()), 0, self.shape.clone(), strides, true, true);
        }
        Self::from_vec_c(self.shape.clone(), self.to_vec())
    }

    /// Copy into a fresh array with the given memory order.
    pub fn as_contiguous(&self, order: Order) -> Self {
        match order {
            Order::C => Self::from_vec_c(self.shape.clone(), self.to_vec()),
            Order::F => {
                let strides = Strides::f_order(&self.shape);
                let v = self.nditer(Order::F).cloned().collect();
                Self::from_buffer(Buffer::from_vec(v), 0, self.shape.clone(), strides, true, true)
            }
        }
    }
}

impl<A: Element + Zero> NDArray<A> {
    /// Create an array filled with zeros.
    pub fn zeros<Sh: ShapeBuilder>(shape: Sh) -> Self {
        Self::from_elem(shape, A::zero())
    }

    /// Create a 2-D `n × n` identity array.
    pub fn eye(n: usize) -> Self
    where
        A: One,
    {
        let mut eye = Self::zeros((n, n));
        if let Some(v) = eye.data.make_mut() {
            for i in 0..n {
                v[i * n + i] = A::one();
            }
        }
        eye
    }
}

impl<A: Element + One> NDArray<A> {
    /// Create an array filled with ones.
    pub fn ones<Sh: ShapeBuilder>(shape: Sh) -> Self {
        Self::from_elem(shape, A::one())
    }
}

impl<A: Element + Num + PartialOrd + Copy> NDArray<A> {
    /// Create a 1-D array of the values `start, start + step, ...` below
    /// `stop`.
    ///
    /// **Errors** if `step` is zero or negative.
    pub fn arange(start: A, stop: A, step: A) -> NdResult<Self> {
        if step <= A::zero() {
            return Err(from_kind(
                ErrorKind::InvalidSliceSpec,
                "arange: step must be positive",
            ));
        }
        let mut v = Vec::new();
        let mut x = start;
        while x < stop {
            v.push(x);
            x = x + step;
        }
        Ok(Self::from_vec1(v))
    }
}

impl<A: Element> Clone for NDArray<A> {
    /// Deep copy, see [`deep_copy`](NDArray::deep_copy).
    fn clone(&self) -> Self {
        self.deep_copy()
    }
}

impl<A: Element> From<Vec<A>> for NDArray<A> {
    fn from(v: Vec<A>) -> Self {
        Self::from_vec1(v)
    }
}

impl<A: Element, const N: usize, const M: usize> From<[[A; M]; N]> for NDArray<A> {
    /// A 2-D array from nested rows.
    fn from(rows: [[A; M]; N]) -> Self {
        let v = rows.iter().flat_map(|r| r.iter().cloned()).collect();
        Self::from_vec_c(Shape::new(vec![N, M]), v)
    }
}

impl<A: Element> TryFrom<Vec<Vec<A>>> for NDArray<A> {
    type Error = ArrayError;

    /// A 2-D array from nested rows; **errors** if the rows are ragged.
    fn try_from(rows: Vec<Vec<A>>) -> Result<Self, ArrayError> {
        let ncols = rows.first().map_or(0, |r| r.len());
        let mut v = Vec::with_capacity(rows.len() * ncols);
        for r in &rows {
            if r.len() != ncols {
                return Err(shape_mismatch("NDArray::try_from(rows)", &[ncols], &[r.len()]));
            }
            v.extend_from_slice(r);
        }
        Ok(Self::from_vec_c(Shape::new(vec![rows.len(), ncols]), v))
    }
}
