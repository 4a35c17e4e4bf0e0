// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::{Matrix, NDArray};

impl<A> NDArray<A> {
    /// A test for equality that uses the elementwise absolute difference to compute the
    /// approximate equality of two arrays.
    ///
    /// **Requires crate feature `"approx"`**
    pub fn abs_diff_eq<B>(&self, other: &NDArray<B>, epsilon: A::Epsilon) -> bool
    where
        A: AbsDiffEq<B>,
        A::Epsilon: Clone,
    {
        <Self as AbsDiffEq<_>>::abs_diff_eq(self, other, epsilon)
    }

    /// A test for equality that uses an elementwise relative comparison if the values are far
    /// apart; and the absolute difference otherwise.
    ///
    /// **Requires crate feature `"approx"`**
    pub fn relative_eq<B>(&self, other: &NDArray<B>, epsilon: A::Epsilon, max_relative: A::Epsilon) -> bool
    where
        A: RelativeEq<B>,
        A::Epsilon: Clone,
    {
        <Self as RelativeEq<_>>::relative_eq(self, other, epsilon, max_relative)
    }
}

/// **Requires crate feature `"approx"`.**
///
/// Arrays of different shapes are never equal; layouts may differ.
impl<A, B> AbsDiffEq<NDArray<B>> for NDArray<A>
where
    A: AbsDiffEq<B>,
    A::Epsilon: Clone,
{
    type Epsilon = A::Epsilon;

    fn default_epsilon() -> A::Epsilon {
        A::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &NDArray<B>, epsilon: A::Epsilon) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        self.iter()
            .zip(other.iter())
            .all(move |(a, b)| A::abs_diff_eq(a, b, epsilon.clone()))
    }
}

/// **Requires crate feature `"approx"`.**
impl<A, B> RelativeEq<NDArray<B>> for NDArray<A>
where
    A: RelativeEq<B>,
    A::Epsilon: Clone,
{
    fn default_max_relative() -> A::Epsilon {
        A::default_max_relative()
    }

    fn relative_eq(&self, other: &NDArray<B>, epsilon: A::Epsilon, max_relative: A::Epsilon) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        self.iter()
            .zip(other.iter())
            .all(move |(a, b)| A::relative_eq(a, b, epsilon.clone(), max_relative.clone()))
    }
}

/// **Requires crate feature `"approx"`.**
impl<A, B> UlpsEq<NDArray<B>> for NDArray<A>
where
    A: UlpsEq<B>,
    A::Epsilon: Clone,
{
    fn default_max_ulps() -> u32 {
        A::default_max_ulps()
    }

    fn ulps_eq(&self, other: &NDArray<B>, epsilon: A::Epsilon, max_ulps: u32) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        self.iter()
            .zip(other.iter())
            .all(move |(a, b)| A::ulps_eq(a, b, epsilon.clone(), max_ulps))
    }
}

/// **Requires crate feature `"approx"`.**
impl<A, B> AbsDiffEq<Matrix<B>> for Matrix<A>
where
    A: AbsDiffEq<B>,
    A::Epsilon: Clone,
{
    type Epsilon = A::Epsilon;

    fn default_epsilon() -> A::Epsilon {
        A::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Matrix<B>, epsilon: A::Epsilon) -> bool {
        self.dim() == other.dim()
            && self
                .as_slice()
                .iter()
                .zip(other.as_slice())
                .all(move |(a, b)| A::abs_diff_eq(a, b, epsilon.clone()))
    }
}

/// **Requires crate feature `"approx"`.**
impl<A, B> RelativeEq<Matrix<B>> for Matrix<A>
where
    A: RelativeEq<B>,
    A::Epsilon: Clone,
{
    fn default_max_relative() -> A::Epsilon {
        A::default_max_relative()
    }

    fn relative_eq(&self, other: &Matrix<B>, epsilon: A::Epsilon, max_relative: A::Epsilon) -> bool {
        self.dim() == other.dim()
            && self
                .as_slice()
                .iter()
                .zip(other.as_slice())
                .all(move |(a, b)| A::relative_eq(a, b, epsilon.clone(), max_relative.clone()))
    }
}

/// **Requires crate feature `"approx"`.**
impl<A, B> UlpsEq<Matrix<B>> for Matrix<A>
where
    A: UlpsEq<B>,
    A::Epsilon: Clone,
{
    fn default_max_ulps() -> u32 {
        A::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Matrix<B>, epsilon: A::Epsilon, max_ulps: u32) -> bool {
        self.dim() == other.dim()
            && self
                .as_slice()
                .iter()
                .zip(other.as_slice())
                .all(move |(a, b)| A::ulps_eq(a, b, epsilon.clone(), max_ulps))
    }
}

#[cfg(test)]
mod tests {
    use approx::{
        assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_eq, assert_relative_ne, assert_ulps_eq,
        assert_ulps_ne,
    };

    use crate::{Matrix, NDArray, ShapeBuilder};

    #[test]
    fn abs_diff_eq() {
        let a = NDArray::from([[0f32, 2.], [-0.000010001, 100000000.]]);
        let mut b = NDArray::from([[0f32, 1.], [-0.000010002, 100000001.]]);
        assert_abs_diff_ne!(a, b);
        b[[0, 1]] = 2.;
        assert_abs_diff_eq!(a, b);

        // Check epsilon.
        assert_abs_diff_eq!(NDArray::from(vec![0.0f32]), NDArray::from(vec![1e-40f32]), epsilon = 1e-40f32);
        assert_abs_diff_ne!(NDArray::from(vec![0.0f32]), NDArray::from(vec![1e-40f32]), epsilon = 1e-41f32);

        // Make sure we can compare different shapes without failure.
        let c = NDArray::from([[1f32, 2.]]);
        assert_abs_diff_ne!(a, c);
    }

    #[test]
    fn relative_eq() {
        let a = NDArray::from([[1f32, 2.], [-0.000010001, 100000000.]]);
        let mut b = NDArray::from([[1f32, 1.], [-0.000010002, 100000001.]]);
        assert_relative_ne!(a, b);
        b[[0, 1]] = 2.;
        assert_relative_eq!(a, b);
        assert!(a.relative_eq(&b, 1e-6, 1e-6));
    }

    #[test]
    fn ulps_eq() {
        let a = NDArray::from([[1f32, 2.], [-0.000010001, 100000000.]]);
        let mut b = NDArray::from([[1f32, 1.], [-0.000010002, 100000001.]]);
        assert_ulps_ne!(a, b);
        b[[0, 1]] = 2.;
        assert_ulps_eq!(a, b);
    }

    #[test]
    fn compares_in_logical_order() {
        let c = NDArray::from_vec((2, 2), vec![1., 2., 3., 4.]).unwrap();
        let f = NDArray::from_vec((2, 2).f(), vec![1., 3., 2., 4.]).unwrap();
        assert_abs_diff_eq!(c, f);
        assert!(c.abs_diff_eq(&f, 0.0));
    }

    #[test]
    fn matrices() {
        let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0 + 1e-12]).unwrap();
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        assert_relative_eq!(a, b, max_relative = 1e-9);
        assert_abs_diff_ne!(a, Matrix::from_vec(1, 4, vec![1.0, 2.0, 3.0, 4.0]).unwrap());
    }
}
