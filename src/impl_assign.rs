// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Write paths mirroring the gathers in `impl_indexing`: the destination
//! region is derived exactly as for reading, then filled from a value
//! array of identical shape or from a single element.

use crate::error::{shape_mismatch, unsupported, NdResult};
use crate::impl_indexing::{zip_positions, MaskTarget, SlicePlan};
use crate::{AxisSelector, Element, Mask, NDArray};

impl<A: Element> NDArray<A> {
    /// Copy `rhs` into the region described by `plan`.
    fn write_plan(&mut self, op: &str, plan: &SlicePlan, rhs: &NDArray<A>) -> NdResult<()> {
        if plan.out_shape != rhs.shape {
            return Err(shape_mismatch(op, plan.out_shape.as_slice(), rhs.shape()));
        }
        let rhs_coef = plan.output_coef(&rhs.strides);
        let src = rhs.data.as_slice();
        let dst = self.buffer_mut(op)?;
        zip_positions(&plan.dims, &plan.coef, plan.offset, &rhs_coef, rhs.offset, |d, s| {
            dst[d] = src[s].clone();
        });
        Ok(())
    }

    fn fill_plan(&mut self, op: &str, plan: &SlicePlan, value: A) -> NdResult<()> {
        let dst = self.buffer_mut(op)?;
        let zeros = vec![0; plan.dims.len()];
        zip_positions(&plan.dims, &plan.coef, plan.offset, &zeros, 0, |d, _| {
            dst[d] = value.clone();
        });
        Ok(())
    }

    /// Assign `rhs` to the selection.
    ///
    /// The selection is resolved exactly as in [`slice`](NDArray::slice),
    /// and `rhs` must have the shape `slice` would return; there is no
    /// broadcasting.
    ///
    /// ```
    /// use ndstrided::{s, NDArray};
    ///
    /// let mut a = NDArray::<i32>::zeros((3, 3));
    /// a.set_slice(&s![1, ..], &NDArray::from(vec![1, 2, 3])).unwrap();
    /// assert_eq!(a.row(1).unwrap().to_vec(), vec![1, 2, 3]);
    /// ```
    ///
    /// **Errors** on an invalid selection, a shape mismatch or a read-only
    /// array.
    pub fn set_slice(&mut self, selectors: &[AxisSelector], rhs: &NDArray<A>) -> NdResult<()> {
        let plan = self.plan("set_slice", selectors)?;
        self.write_plan("set_slice", &plan, rhs)
    }

    /// Set every element of the selection to `value`.
    pub fn fill_slice(&mut self, selectors: &[AxisSelector], value: A) -> NdResult<()> {
        let plan = self.plan("fill_slice", selectors)?;
        self.fill_plan("fill_slice", &plan, value)
    }

    /// Assign `rhs` to the sub-array at index `i` of the leading axis;
    /// the write counterpart of [`at`](NDArray::at).
    pub fn set_at(&mut self, i: isize, rhs: &NDArray<A>) -> NdResult<()> {
        if self.ndim() == 0 {
            return Err(unsupported("set_at: cannot index a scalar"));
        }
        let plan = self.plan("set_at", &[AxisSelector::Index(i)])?;
        self.write_plan("set_at", &plan, rhs)
    }

    /// Scatter the rows of `rhs` to the rows `indices` of the leading axis.
    ///
    /// `rhs` must have shape `(indices.len(), ...)` with the trailing
    /// extents of `self`. With repeated indices the last write wins.
    pub fn set_rows(&mut self, indices: &[usize], rhs: &NDArray<A>) -> NdResult<()> {
        self.check_rows("set_rows", indices)?;
        let expect = self.shape.pop(0)?.join(0, indices.len())?;
        if expect != rhs.shape {
            return Err(shape_mismatch("set_rows", expect.as_slice(), rhs.shape()));
        }
        for (k, &i) in indices.iter().enumerate() {
            let plan = self.plan("set_rows", &[AxisSelector::Index(i as isize)])?;
            let rhs_plan = rhs.plan("set_rows", &[AxisSelector::Index(k as isize)])?;
            let src = rhs.data.as_slice();
            let dst = self.buffer_mut("set_rows")?;
            zip_positions(&plan.dims, &plan.coef, plan.offset, &rhs_plan.coef, rhs_plan.offset, |d, s| {
                dst[d] = src[s].clone();
            });
        }
        Ok(())
    }

    /// Set every row in `indices` to `value`.
    pub fn fill_rows(&mut self, indices: &[usize], value: A) -> NdResult<()> {
        self.check_rows("fill_rows", indices)?;
        for &i in indices {
            let plan = self.plan("fill_rows", &[AxisSelector::Index(i as isize)])?;
            self.fill_plan("fill_rows", &plan, value.clone())?;
        }
        Ok(())
    }

    /// Assign through a boolean mask; the write counterpart of
    /// [`select_mask`](NDArray::select_mask).
    ///
    /// For a same-shape mask `rhs` is 1-D with one element per `true`, in
    /// the order `select_mask` would return them. For a row mask `rhs`
    /// holds the selected rows.
    pub fn set_mask(&mut self, mask: &Mask, rhs: &NDArray<A>) -> NdResult<()> {
        match self.mask_target("set_mask", mask)? {
            MaskTarget::Elements(pos) => {
                if rhs.ndim() != 1 || rhs.size() != pos.len() {
                    return Err(shape_mismatch("set_mask", &[pos.len()], rhs.shape()));
                }
                let values = rhs.to_vec();
                let dst = self.buffer_mut("set_mask")?;
                for (p, v) in pos.into_iter().zip(values) {
                    dst[p] = v;
                }
                Ok(())
            }
            MaskTarget::Rows(rows) => self.set_rows(&rows, rhs),
        }
    }

    /// Set every element selected by `mask` to `value`.
    pub fn fill_mask(&mut self, mask: &Mask, value: A) -> NdResult<()> {
        match self.mask_target("fill_mask", mask)? {
            MaskTarget::Elements(pos) => {
                let dst = self.buffer_mut("fill_mask")?;
                for p in pos {
                    dst[p] = value.clone();
                }
                Ok(())
            }
            MaskTarget::Rows(rows) => self.fill_rows(&rows, value),
        }
    }
}
