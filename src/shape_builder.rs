// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::dimension::{IntoShape, Shape};
use crate::order::Order;

/// A contiguous array shape together with its memory order.
///
/// C order is the default; use [`ShapeBuilder::f`] to request F order, as
/// in `NDArray::<f64>::zeros((3, 4).f())`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderedShape {
    pub(crate) shape: Shape,
    pub(crate) order: Order,
}

impl OrderedShape {
    /// Return a reference to the shape
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Return the requested memory order
    pub fn order(&self) -> Order {
        self.order
    }

    /// Return the size of the shape in number of elements
    pub fn size(&self) -> usize {
        self.shape.size()
    }
}

/// Shape argument for array constructors, with an optional memory order.
///
/// Every [`IntoShape`] type is a `ShapeBuilder` in C order; `.f()` and
/// `.set_order()` change the order.
pub trait ShapeBuilder {
    fn into_ordered(self) -> OrderedShape;

    fn f(self) -> OrderedShape
    where
        Self: Sized,
    {
        self.set_order(Order::F)
    }

    fn c(self) -> OrderedShape
    where
        Self: Sized,
    {
        self.set_order(Order::C)
    }

    fn set_order(self, order: Order) -> OrderedShape
    where
        Self: Sized,
    {
        let mut s = self.into_ordered();
        s.order = order;
        s
    }
}

impl<T> ShapeBuilder for T
where
    T: IntoShape,
{
    fn into_ordered(self) -> OrderedShape {
        OrderedShape {
            shape: self.into_shape(),
            order: Order::C,
        }
    }
}

impl ShapeBuilder for OrderedShape {
    fn into_ordered(self) -> OrderedShape {
        self
    }
}

impl<T> ShapeBuilder for (T, Order)
where
    T: IntoShape,
{
    fn into_ordered(self) -> OrderedShape {
        OrderedShape {
            shape: self.0.into_shape(),
            order: self.1,
        }
    }
}
