// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![crate_name = "ndstrided"]
#![doc(html_root_url = "https://docs.rs/ndstrided/0.1/")]
#![allow(
    clippy::many_single_char_names,
    clippy::deref_addrof,
    clippy::unreadable_literal,
    clippy::manual_map,
    clippy::needless_range_loop
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! The `ndstrided` crate provides [`NDArray`], a strided n-dimensional
//! container in the spirit of NumPy's `ndarray`, together with a dense 2-D
//! [`Matrix`] and LU based solvers.
//!
//! - An array is a buffer plus an element offset, a [`Shape`] and
//!   [`Strides`]; [`Flags`] classify the layout as C (row major) and/or F
//!   (column major) contiguous and record buffer ownership.
//! - Slicing with [`s![]`](s!) selectors copies the selected region into a
//!   fresh array ([`NDArray::slice`]); [`NDArray::slice_view`] is the
//!   zero-copy alternative. An integer selector removes its axis, a range
//!   keeps it, so `a.slice(&s![1, 1])` is 0-D while `a.slice(&s![1..2, 1..2])`
//!   has shape `(1, 1)`.
//! - Negative indices are rejected by slicing and accepted by the element
//!   accessors [`item`](NDArray::item) and [`item_at`](NDArray::item_at).
//! - Arithmetic is elementwise and requires identical shapes; there is no
//!   broadcasting.
//! - [`linalg`] implements LU decomposition with optional partial pivoting,
//!   forward and back substitution, [`solve`](linalg::solve),
//!   [`inv`](linalg::inv) and [`lstsq`](linalg::lstsq). With the `rayon`
//!   feature (on by default) the columns of the right hand side are solved
//!   in parallel.
//!
//! ## Crate Feature Flags
//!
//! - `rayon` (default): parallel column solves.
//! - `approx`: `AbsDiffEq`, `RelativeEq` and `UlpsEq` for arrays and
//!   matrices.
//! - `serde`: serialization of [`NDArray`] and [`Matrix`].

#[macro_use]
mod macro_utils;

pub use crate::data_repr::Buffer;
pub use crate::dimension::{Axis, IntoShape, Shape, Strides};
pub use crate::dtype::{DType, Element, Promote};
pub use crate::error::{ArrayError, ErrorKind, NdResult};
pub use crate::impl_ops::ScalarOperand;
pub use crate::iterators::{AxisIter, IndexedIter, Iter, LanesIter, NdIter};
pub use crate::layout::Flags;
pub use crate::linalg::{LinalgScalar, NdFloat};
pub use crate::matrix::Matrix;
pub use crate::order::Order;
pub use crate::shape_builder::{OrderedShape, ShapeBuilder};
pub use crate::slice::{AdjustedSlice, AxisSelector, Slice};

mod arrayformat;
mod arraytraits;
#[cfg(feature = "approx")]
mod array_approx;
#[cfg(feature = "serde")]
mod array_serde;
mod data_repr;
pub mod dimension;
mod dtype;
mod error;
mod impl_assign;
mod impl_constructors;
mod impl_indexing;
mod impl_methods;
mod impl_ops;
pub mod io;
mod iterators;
pub mod layout;
pub mod linalg;
mod matrix;
mod order;
mod shape_builder;
mod slice;

/// The `ndstrided` prelude.
pub mod prelude {
    pub use crate::{s, Axis, AxisSelector, Matrix, NDArray, Order, Shape, ShapeBuilder, Slice};
    pub use crate::linalg::{inv, lstsq, solve};
}

/// A strided n-dimensional array.
///
/// The elements live in a [`Buffer`]; the array addresses them through an
/// element offset and per-axis strides, so the same buffer can back
/// several arrays with different geometry. Element `(i0, i1, ...)` is at
/// buffer position `offset + i0 * strides[0] + i1 * strides[1] + ...`.
///
/// Invariants:
///
/// - `shape.ndim() == strides.ndim()`;
/// - every element position lies inside the buffer;
/// - `flags` reflect the geometry, except for arrays built with
///   [`NDArray::from_parts`], whose flags are taken as given.
///
/// Arrays built by constructors, slicing and arithmetic own a fresh
/// contiguous buffer (`OWNDATA`, `WRITEABLE`). [`view`](NDArray::view),
/// [`slice_view`](NDArray::slice_view), [`transpose`](NDArray::transpose)
/// and [`from_raw_parts`](NDArray::from_raw_parts) produce read-only views.
pub struct NDArray<A> {
    data: Buffer<A>,
    /// element offset of the first element in `data`
    offset: usize,
    shape: Shape,
    strides: Strides,
    flags: Flags,
}

/// An `NDArray` of booleans, used as a selection mask.
pub type Mask = NDArray<bool>;
