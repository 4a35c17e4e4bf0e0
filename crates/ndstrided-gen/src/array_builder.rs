// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use ndstrided::{Element, IntoShape, NDArray, Order, Shape, ShapeBuilder};

use num_traits::Num;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayBuilder {
    shape: Shape,
    memory_order: Order,
    generator: ElementGenerator,
}

/// How to generate elements
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementGenerator {
    /// 0, 1, 2, ... in logical (row-major) order
    Sequential,
    Zero,
}

impl Default for ArrayBuilder {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ArrayBuilder {
    pub fn new(shape: impl IntoShape) -> Self {
        ArrayBuilder {
            shape: shape.into_shape(),
            memory_order: Order::C,
            generator: ElementGenerator::Sequential,
        }
    }

    pub fn memory_order(mut self, order: Order) -> Self {
        self.memory_order = order;
        self
    }

    pub fn generator(mut self, generator: ElementGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Build the array. Element values follow logical order, so the C and
    /// F arrays of one builder compare equal and differ only in strides.
    pub fn build<T>(self) -> NDArray<T>
    where
        T: Element + Num,
    {
        let use_zeros = self.generator == ElementGenerator::Zero;
        let logical = self.shape.clone();
        let mut memory = vec![T::zero(); logical.size()];
        if !use_zeros {
            let mut current = T::zero();
            let strides = logical.default_strides(self.memory_order);
            for i in 0..logical.size() {
                let pos = strides.offset_of(&logical.unravel_index(i));
                memory[pos as usize] = current.clone();
                current = current + T::one();
            }
        }
        NDArray::from_vec(self.shape.set_order(self.memory_order), memory).unwrap()
    }
}

#[test]
fn test_order() {
    let (m, n) = (12, 13);
    let c = ArrayBuilder::new((m, n)).memory_order(Order::C).build::<i32>();
    let f = ArrayBuilder::new((m, n)).memory_order(Order::F).build::<i32>();

    assert_eq!(c.shape(), &[m, n]);
    assert_eq!(f.shape(), &[m, n]);
    assert_eq!(c.strides(), &[n as isize, 1]);
    assert_eq!(f.strides(), &[1, m as isize]);
    assert_eq!(c, f);
    assert_eq!(c.item_at(&[1, 2]).unwrap(), n as i32 + 2);
}

#[test]
fn test_zero() {
    let z = ArrayBuilder::new((3, 4, 2)).generator(ElementGenerator::Zero).build::<f64>();
    assert_eq!(z.shape(), &[3, 4, 2]);
    assert!(z.iter().all(|&x| x == 0.));
}
