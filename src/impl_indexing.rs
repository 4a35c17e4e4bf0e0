// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Slicing and gathering: every read path that derives a new array from a
//! selection of an existing one.

use crate::dimension::{Axis, Shape, Strides};
use crate::error::{from_kind, index_out_of_bounds, shape_mismatch, unsupported, ErrorKind, NdResult};
use crate::{AxisSelector, Element, Mask, NDArray, Order, Slice};

/// Geometry of a selection, resolved against a source array.
///
/// The traversal runs over every source axis (`dims`, `coef`); axes selected
/// by a plain index have length one there and are dropped from `out_shape`.
#[derive(Debug)]
pub(crate) struct SlicePlan {
    /// Selected extent of each source axis
    pub(crate) dims: Vec<usize>,
    /// Source offset delta of one step along each axis (stride × step)
    pub(crate) coef: Vec<isize>,
    /// Whether each source axis survives into the output
    pub(crate) keep: Vec<bool>,
    pub(crate) out_shape: Shape,
    /// Buffer position of the first selected element
    pub(crate) offset: usize,
}

impl SlicePlan {
    pub(crate) fn size(&self) -> usize {
        self.out_shape.size()
    }

    /// Offset deltas for writing the selection into an array with
    /// `out_strides`: the output stride for kept axes, zero for elided ones.
    pub(crate) fn output_coef(&self, out_strides: &Strides) -> Vec<isize> {
        let mut kept = out_strides.as_slice().iter();
        self.keep
            .iter()
            .map(|&k| if k { kept.next().cloned().unwrap_or(0) } else { 0 })
            .collect()
    }
}

/// Walk two strided regions in lockstep, calling `f` with the pair of
/// buffer positions for every coordinate of `dims` in odometer order.
pub(crate) fn zip_positions<F>(
    dims: &[usize],
    a_coef: &[isize],
    a_start: usize,
    b_coef: &[isize],
    b_start: usize,
    mut f: F,
) where
    F: FnMut(usize, usize),
{
    if dims.iter().any(|&d| d == 0) {
        return;
    }
    let mut index = vec![0; dims.len()];
    let mut a = a_start as isize;
    let mut b = b_start as isize;
    loop {
        f(a as usize, b as usize);
        // both offsets step together; `index` is advanced once
        for axis in (0..dims.len()).rev() {
            index[axis] += 1;
            a += a_coef[axis];
            b += b_coef[axis];
            if index[axis] == dims[axis] {
                a -= a_coef[axis] * dims[axis] as isize;
                b -= b_coef[axis] * dims[axis] as isize;
                index[axis] = 0;
            } else {
                break;
            }
        }
        if index.iter().all(|&i| i == 0) {
            return;
        }
    }
}

impl<A> NDArray<A> {
    /// Resolve `selectors` against this array.
    ///
    /// Missing trailing selectors select the whole axis. More selectors
    /// than axes is an error.
    pub(crate) fn plan(&self, op: &str, selectors: &[AxisSelector]) -> NdResult<SlicePlan> {
        if selectors.len() > self.ndim() {
            return Err(from_kind(
                ErrorKind::DimensionalityMismatch,
                format!(
                    "{}: {} selectors given for an array of {} dimensions",
                    op,
                    selectors.len(),
                    self.ndim()
                ),
            ));
        }
        let full = AxisSelector::Range(Slice::full());
        let mut dims = Vec::with_capacity(self.ndim());
        let mut coef = Vec::with_capacity(self.ndim());
        let mut keep = Vec::with_capacity(self.ndim());
        let mut out = Vec::with_capacity(self.ndim());
        let mut offset = self.offset as isize;
        for axis in 0..self.ndim() {
            let sel = selectors.get(axis).unwrap_or(&full);
            let len = self.shape[axis];
            let stride = self.strides[axis];
            let adj = sel.adjust(axis, len)?;
            let n = adj.len();
            if n > 0 {
                offset += adj.start as isize * stride;
            }
            dims.push(n);
            coef.push(stride * adj.step as isize);
            keep.push(sel.is_range());
            if sel.is_range() {
                out.push(n);
            }
        }
        Ok(SlicePlan {
            dims,
            coef,
            keep,
            out_shape: Shape::new(out),
            offset: offset as usize,
        })
    }

    /// Memory order of arrays materialized from this one: the source's
    /// contiguity decides, C for non-contiguous sources.
    pub(crate) fn derived_order(&self) -> Order {
        if !self.is_c_contiguous() && self.is_f_contiguous() {
            Order::F
        } else {
            Order::C
        }
    }

    /// Return a zero-copy, read-only view of the selection.
    ///
    /// ```
    /// use ndstrided::{s, NDArray};
    ///
    /// let a = NDArray::from_shape_fn((4, 4), |ix| ix[0] * 4 + ix[1]);
    /// let v = a.slice_view(&s![1..4;2, 2]).unwrap();
    /// assert_eq!(v.to_vec(), vec![6, 14]);
    /// assert!(v.is_view());
    /// ```
    pub fn slice_view(&self, selectors: &[AxisSelector]) -> NdResult<NDArray<A>> {
        let plan = self.plan("slice_view", selectors)?;
        let strides = plan
            .coef
            .iter()
            .zip(&plan.keep)
            .filter(|(_, &k)| k)
            .map(|(&c, _)| c)
            .collect();
        Ok(NDArray::from_buffer(
            self.data.share(),
            plan.offset,
            plan.out_shape,
            Strides::new(strides),
            false,
            false,
        ))
    }
}

impl<A: Element> NDArray<A> {
    /// Copy the selection described by `plan` into a fresh owning array.
    pub(crate) fn materialize(&self, plan: &SlicePlan) -> NDArray<A> {
        let out_strides = plan.out_shape.default_strides(self.derived_order());
        let dst_coef = plan.output_coef(&out_strides);
        let mut out = expect_ok!(NDArray::with_strides(plan.out_shape.clone(), 0, out_strides));
        let src = self.data.as_slice();
        if let Some(dst) = out.data.make_mut() {
            zip_positions(&plan.dims, &plan.coef, plan.offset, &dst_coef, 0, |s, d| {
                dst[d] = src[s].clone();
            });
        }
        out
    }

    /// Return a copy of the selection.
    ///
    /// Each axis takes a selector: a range (possibly stepped) keeps the
    /// axis, a plain index removes it. Selecting every axis with an index
    /// yields a 0-D array, while unit-length ranges keep their axes:
    ///
    /// ```
    /// use ndstrided::{s, NDArray};
    ///
    /// let a = NDArray::<f64>::zeros((3, 3));
    /// assert_eq!(a.slice(&s![1, 1]).unwrap().ndim(), 0);
    /// assert_eq!(a.slice(&s![1..2, 1..2]).unwrap().shape(), &[1, 1]);
    /// ```
    ///
    /// The result owns its data. It is F-contiguous when the source is
    /// F-contiguous (and not C-contiguous), C-contiguous otherwise.
    ///
    /// **Errors** if there are more selectors than axes, if a range is
    /// invalid for its axis (zero or negative step, negative or out of range
    /// bounds, empty range) or if an index is out of bounds.
    pub fn slice(&self, selectors: &[AxisSelector]) -> NdResult<NDArray<A>> {
        let plan = self.plan("slice", selectors)?;
        Ok(self.materialize(&plan))
    }

    /// Copy of the selection given by one range per leading axis.
    pub fn slice_ranges(&self, ranges: &[Slice]) -> NdResult<NDArray<A>> {
        let sel: Vec<AxisSelector> = ranges.iter().map(|&r| AxisSelector::Range(r)).collect();
        self.slice(&sel)
    }

    /// Index the leading axis: `a.at(i)` has one dimension less than `a`.
    ///
    /// For a 1-D array the result is a 0-D array; unwrap it with
    /// [`to_scalar`](NDArray::to_scalar) or [`item`](NDArray::item).
    ///
    /// **Errors** if the array is 0-D or `i` is out of bounds.
    pub fn at(&self, i: isize) -> NdResult<NDArray<A>> {
        if self.ndim() == 0 {
            return Err(unsupported("at: cannot index a scalar"));
        }
        self.slice(&[AxisSelector::Index(i)])
    }

    /// Copy of the sub-array at index `index` along `axis`.
    pub fn index_axis(&self, axis: Axis, index: usize) -> NdResult<NDArray<A>> {
        let sel = self.axis_selectors("index_axis", axis, index)?;
        self.slice(&sel)
    }

    pub(crate) fn axis_selectors(&self, op: &str, axis: Axis, index: usize) -> NdResult<Vec<AxisSelector>> {
        if axis.index() >= self.ndim() {
            return Err(index_out_of_bounds(op, axis.index() as isize, None, self.ndim()));
        }
        let mut sel = vec![AxisSelector::Range(Slice::full()); self.ndim()];
        sel[axis.index()] = AxisSelector::Index(index as isize);
        Ok(sel)
    }

    /// Check `indices` against the leading axis.
    pub(crate) fn check_rows(&self, op: &str, indices: &[usize]) -> NdResult<()> {
        if self.ndim() == 0 {
            return Err(unsupported(format!("{}: cannot index a scalar", op)));
        }
        let len = self.shape[0];
        match indices.iter().find(|&&i| i >= len) {
            Some(&i) => Err(index_out_of_bounds(op, i as isize, Some(0), len)),
            None => Ok(()),
        }
    }

    /// Gather whole rows (sub-arrays along the leading axis) in the order
    /// given; indices may repeat.
    ///
    /// The result has shape `(indices.len(), ...)`, is C-contiguous and
    /// owns its data.
    pub fn select_rows(&self, indices: &[usize]) -> NdResult<NDArray<A>> {
        self.check_rows("select_rows", indices)?;
        let out_shape = self.shape.pop(0)?.join(0, indices.len())?;
        let row_len = if self.shape[0] == 0 { 0 } else { self.size() / self.shape[0] };
        let mut v = Vec::with_capacity(indices.len() * row_len);
        if self.is_c_contiguous() {
            // rows are contiguous blocks
            let src = self.data.as_slice();
            for &i in indices {
                let start = self.offset + i * row_len;
                v.extend_from_slice(&src[start..start + row_len]);
            }
        } else {
            for &i in indices {
                let plan = self.plan("select_rows", &[AxisSelector::Index(i as isize)])?;
                self.gather_into(&plan, &mut v);
            }
        }
        Ok(NDArray::from_vec_c(out_shape, v))
    }

    /// Append the selection of `plan` to `v` in logical order.
    fn gather_into(&self, plan: &SlicePlan, v: &mut Vec<A>) {
        let src = self.data.as_slice();
        let zeros = vec![0; plan.dims.len()];
        zip_positions(&plan.dims, &plan.coef, plan.offset, &zeros, 0, |s, _| {
            v.push(src[s].clone());
        });
    }

    /// Resolve a boolean mask against this array.
    pub(crate) fn mask_target(&self, op: &str, mask: &Mask) -> NdResult<MaskTarget> {
        if mask.shape == self.shape {
            return Ok(MaskTarget::Elements(self.mask_positions(mask)));
        }
        if mask.ndim() == 1 && self.ndim() >= 1 && mask.shape[0] == self.shape[0] {
            let rows = mask
                .iter()
                .enumerate()
                .filter(|(_, &m)| m)
                .map(|(i, _)| i)
                .collect();
            return Ok(MaskTarget::Rows(rows));
        }
        Err(shape_mismatch(op, self.shape(), mask.shape()))
    }

    /// Buffer positions of the elements selected by a same-shape mask.
    ///
    /// The mask is always read at the logical coordinate of each element.
    /// An F-contiguous source is visited in storage (column-major) order,
    /// every other source in logical order.
    fn mask_positions(&self, mask: &Mask) -> Vec<usize> {
        let m = mask.data.as_slice();
        let mut pos = Vec::new();
        let push = |s: usize, mk: usize| {
            if m[mk] {
                pos.push(s);
            }
        };
        if self.is_f_contiguous() && !self.is_c_contiguous() {
            // column-major storage order is the row-major walk of the reversed axes
            let dims: Vec<usize> = self.shape().iter().rev().cloned().collect();
            let src: Vec<isize> = self.strides().iter().rev().cloned().collect();
            let msk: Vec<isize> = mask.strides().iter().rev().cloned().collect();
            zip_positions(&dims, &src, self.offset, &msk, mask.offset, push);
        } else {
            zip_positions(
                self.shape(),
                self.strides(),
                self.offset,
                mask.strides(),
                mask.offset,
                push,
            );
        }
        pos
    }

    /// Gather by boolean mask.
    ///
    /// - A mask of the array's own shape selects single elements; the
    ///   result is 1-D with one element per `true`.
    /// - A 1-D mask as long as the leading axis selects rows, like
    ///   [`select_rows`](NDArray::select_rows).
    ///
    /// **Errors** with `ShapeMismatch` for any other mask shape.
    pub fn select_mask(&self, mask: &Mask) -> NdResult<NDArray<A>> {
        match self.mask_target("select_mask", mask)? {
            MaskTarget::Elements(pos) => {
                let src = self.data.as_slice();
                Ok(NDArray::from_vec1(pos.iter().map(|&p| src[p].clone()).collect()))
            }
            MaskTarget::Rows(rows) => self.select_rows(&rows),
        }
    }
}

/// What a boolean mask selects.
pub(crate) enum MaskTarget {
    /// Buffer positions of single elements
    Elements(Vec<usize>),
    /// Indices along the leading axis
    Rows(Vec<usize>),
}
