// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use num_complex::Complex;
use num_traits::AsPrimitive;

use crate::error::{shape_mismatch, NdResult};
use crate::{Element, Mask, NDArray, Promote};

/// Elements that can be used as direct operands in arithmetic with arrays.
///
/// For example, `f64` is a `ScalarOperand` which means that for an array `a`,
/// arithmetic like `&a + 1.0`, and, `&a * 2.`, and `a += 3.` are allowed.
///
/// Left hand side scalar operands are implemented one concrete type at a
/// time, allowing `2. * &a` for the primitive numeric types.
pub trait ScalarOperand: 'static + Clone {}
impl ScalarOperand for bool {}
impl ScalarOperand for i8 {}
impl ScalarOperand for u8 {}
impl ScalarOperand for i16 {}
impl ScalarOperand for u16 {}
impl ScalarOperand for i32 {}
impl ScalarOperand for u32 {}
impl ScalarOperand for i64 {}
impl ScalarOperand for u64 {}
impl ScalarOperand for isize {}
impl ScalarOperand for usize {}
impl ScalarOperand for f32 {}
impl ScalarOperand for f64 {}
impl ScalarOperand for Complex<f32> {}
impl ScalarOperand for Complex<f64> {}

impl<A: Element> NDArray<A> {
    fn zip_same_shape<B, C, F>(&self, op: &str, rhs: &NDArray<B>, f: F) -> NdResult<NDArray<C>>
    where
        B: Element,
        F: FnMut(&A, &B) -> C,
    {
        if self.shape != rhs.shape {
            return Err(shape_mismatch(op, self.shape(), rhs.shape()));
        }
        self.zip_with(rhs, f)
    }
}

macro_rules! impl_binary_op(
    ($trt:ident, $operator:tt, $mth:ident, $try_mth:ident, $atrt:ident, $amth:ident, $doc:expr) => (
impl<A> NDArray<A>
where
    A: Element + std::ops::$trt<Output = A>,
{
    /// Perform elementwise
    #[doc=$doc]
    /// between `self` and `rhs` and return the result as a new array.
    ///
    /// **Errors** with `ShapeMismatch` unless the shapes are identical;
    /// there is no broadcasting.
    pub fn $try_mth(&self, rhs: &NDArray<A>) -> NdResult<NDArray<A>> {
        self.zip_same_shape(stringify!($mth), rhs, |x, y| x.clone() $operator y.clone())
    }
}

/// Perform elementwise
#[doc=$doc]
/// between references `self` and `rhs`,
/// and return the result as a new array.
///
/// **Panics** if the shapes differ.
impl<'a, A> std::ops::$trt<&'a NDArray<A>> for &'a NDArray<A>
where
    A: Element + std::ops::$trt<Output = A>,
{
    type Output = NDArray<A>;
    fn $mth(self, rhs: &'a NDArray<A>) -> NDArray<A> {
        expect_ok!(self.$try_mth(rhs))
    }
}

/// Perform elementwise
#[doc=$doc]
/// between `self` and `rhs`,
/// and return the result as a new array.
///
/// **Panics** if the shapes differ.
impl<A> std::ops::$trt<NDArray<A>> for NDArray<A>
where
    A: Element + std::ops::$trt<Output = A>,
{
    type Output = NDArray<A>;
    fn $mth(self, rhs: NDArray<A>) -> NDArray<A> {
        expect_ok!(self.$try_mth(&rhs))
    }
}

impl<'a, A> std::ops::$trt<&'a NDArray<A>> for NDArray<A>
where
    A: Element + std::ops::$trt<Output = A>,
{
    type Output = NDArray<A>;
    fn $mth(self, rhs: &'a NDArray<A>) -> NDArray<A> {
        expect_ok!(self.$try_mth(rhs))
    }
}

/// Perform elementwise
#[doc=$doc]
/// between the reference `self` and the scalar `x`,
/// and return the result as a new array.
impl<'a, A, B> std::ops::$trt<B> for &'a NDArray<A>
where
    A: Element + std::ops::$trt<B, Output = A>,
    B: ScalarOperand,
{
    type Output = NDArray<A>;
    fn $mth(self, x: B) -> NDArray<A> {
        self.mapv(move |elt| elt $operator x.clone())
    }
}

impl<A, B> std::ops::$trt<B> for NDArray<A>
where
    A: Element + std::ops::$trt<B, Output = A>,
    B: ScalarOperand,
{
    type Output = NDArray<A>;
    fn $mth(self, x: B) -> NDArray<A> {
        self.mapv(move |elt| elt $operator x.clone())
    }
}

/// Perform `self $operator= rhs` elementwise.
///
/// **Panics** if the shapes differ or `self` is not writeable.
impl<'a, A> std::ops::$atrt<&'a NDArray<A>> for NDArray<A>
where
    A: Element + std::ops::$trt<Output = A>,
{
    fn $amth(&mut self, rhs: &'a NDArray<A>) {
        if self.shape != rhs.shape {
            panic!("{}", shape_mismatch(stringify!($amth), self.shape(), rhs.shape()));
        }
        let mut values = rhs.iter();
        expect_ok!(self.map_inplace(|elt| {
            if let Some(y) = values.next() {
                *elt = elt.clone() $operator y.clone();
            }
        }));
    }
}

/// Perform `self $operator= x` elementwise.
///
/// **Panics** if `self` is not writeable.
impl<A, B> std::ops::$atrt<B> for NDArray<A>
where
    A: Element + std::ops::$trt<B, Output = A>,
    B: ScalarOperand,
{
    fn $amth(&mut self, x: B) {
        expect_ok!(self.mapv_inplace(move |elt| elt $operator x.clone()));
    }
}
    );
);

impl_binary_op!(Add, +, add, try_add, AddAssign, add_assign, "addition");
impl_binary_op!(Sub, -, sub, try_sub, SubAssign, sub_assign, "subtraction");
impl_binary_op!(Mul, *, mul, try_mul, MulAssign, mul_assign, "multiplication");
impl_binary_op!(Div, /, div, try_div, DivAssign, div_assign, "division");
impl_binary_op!(Rem, %, rem, try_rem, RemAssign, rem_assign, "remainder");

// Pick the expression $a for commutative and $b for ordered binop
macro_rules! if_commutative {
    (Commute { $a:expr } or { $b:expr }) => {
        $a
    };
    (Ordered { $a:expr } or { $b:expr }) => {
        $b
    };
}

macro_rules! impl_scalar_lhs_op {
    ($scalar:ty, $commutative:ident, $operator:tt, $trt:ident, $mth:ident) => (
// Perform elementwise
// between the scalar `self` and array `rhs`,
// and return the result as a new array.
impl<'a> std::ops::$trt<&'a NDArray<$scalar>> for $scalar {
    type Output = NDArray<$scalar>;
    fn $mth(self, rhs: &NDArray<$scalar>) -> NDArray<$scalar> {
        if_commutative!($commutative {
            rhs.$mth(self)
        } or {
            rhs.mapv(move |elt| self $operator elt)
        })
    }
}

impl std::ops::$trt<NDArray<$scalar>> for $scalar {
    type Output = NDArray<$scalar>;
    fn $mth(self, rhs: NDArray<$scalar>) -> NDArray<$scalar> {
        self.$mth(&rhs)
    }
}
    );
}

macro_rules! all_scalar_ops {
    ($($scalar:ty),*) => ($(
        impl_scalar_lhs_op!($scalar, Commute, +, Add, add);
        impl_scalar_lhs_op!($scalar, Ordered, -, Sub, sub);
        impl_scalar_lhs_op!($scalar, Commute, *, Mul, mul);
        impl_scalar_lhs_op!($scalar, Ordered, /, Div, div);
        impl_scalar_lhs_op!($scalar, Ordered, %, Rem, rem);
    )*);
}

all_scalar_ops!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize, f32, f64);

impl<A> std::ops::Neg for NDArray<A>
where
    A: Element + std::ops::Neg<Output = A>,
{
    type Output = Self;
    /// Perform an elementwise negation of `self` and return the result.
    fn neg(self) -> Self {
        self.mapv(|elt| -elt)
    }
}

impl<'a, A> std::ops::Neg for &'a NDArray<A>
where
    A: Element + std::ops::Neg<Output = A>,
{
    type Output = NDArray<A>;
    /// Perform an elementwise negation of reference `self` and return the
    /// result as a new array.
    fn neg(self) -> NDArray<A> {
        self.mapv(|elt| -elt)
    }
}

impl<A> std::ops::Not for NDArray<A>
where
    A: Element + std::ops::Not<Output = A>,
{
    type Output = Self;
    /// Perform an elementwise unary not of `self` and return the result.
    fn not(self) -> Self {
        self.mapv(|elt| !elt)
    }
}

impl<'a, A> std::ops::Not for &'a NDArray<A>
where
    A: Element + std::ops::Not<Output = A>,
{
    type Output = NDArray<A>;
    /// Perform an elementwise unary not of reference `self` and return the
    /// result as a new array.
    fn not(self) -> NDArray<A> {
        self.mapv(|elt| !elt)
    }
}

macro_rules! impl_comparison {
    ($($mth:ident, $mth_scalar:ident, $cmp:ident, $doc:expr;)*) => {
/// # Comparisons
///
/// Each comparison returns a boolean [`Mask`] of the operands' shape,
/// usable with [`select_mask`](NDArray::select_mask).
impl<A: Element + PartialOrd> NDArray<A> {
    $(
    /// Elementwise
    #[doc=$doc]
    /// of `self` and `rhs`.
    ///
    /// **Errors** with `ShapeMismatch` unless the shapes are identical.
    pub fn $mth(&self, rhs: &NDArray<A>) -> NdResult<Mask> {
        self.zip_same_shape(stringify!($mth), rhs, |x, y| x.$cmp(y))
    }

    /// Elementwise
    #[doc=$doc]
    /// of `self` and the scalar `x`.
    pub fn $mth_scalar(&self, x: A) -> Mask {
        self.map(|elt| elt.$cmp(&x))
    }
    )*
}
    };
}

impl_comparison! {
    equal, equal_scalar, eq, "`==`";
    not_equal, not_equal_scalar, ne, "`!=`";
    less, less_scalar, lt, "`<`";
    less_equal, less_equal_scalar, le, "`<=`";
    greater, greater_scalar, gt, "`>`";
    greater_equal, greater_equal_scalar, ge, "`>=`";
}

macro_rules! impl_promoted_op {
    ($($mth:ident, $operator:tt, $trt:ident, $doc:expr;)*) => {
/// # Mixed-type Arithmetic
///
/// Both operands are converted to the join of their element types (see
/// [`Promote`]) before the exact-shape elementwise operation.
impl<A: Element> NDArray<A> {
    $(
    /// Elementwise
    #[doc=$doc]
    /// with dtype promotion.
    ///
    /// ```
    /// use ndstrided::NDArray;
    ///
    /// let a = NDArray::from(vec![1u8, 2, 3]);
    /// let b = NDArray::from(vec![0.5f32, 0.5, 0.5]);
    #[doc = concat!("let c = a.", stringify!($mth), "(&b).unwrap();")]
    /// assert_eq!(c.dtype(), ndstrided::DType::Float32);
    /// ```
    ///
    /// **Errors** with `ShapeMismatch` unless the shapes are identical.
    pub fn $mth<B>(&self, rhs: &NDArray<B>) -> NdResult<NDArray<<A as Promote<B>>::Output>>
    where
        A: Promote<B> + AsPrimitive<<A as Promote<B>>::Output>,
        B: Element + AsPrimitive<<A as Promote<B>>::Output>,
        <A as Promote<B>>::Output: Copy + std::ops::$trt<Output = <A as Promote<B>>::Output>,
    {
        self.zip_same_shape(stringify!($mth), rhs, |&x, &y| x.as_() $operator y.as_())
    }
    )*
}
    };
}

impl_promoted_op! {
    add_promoted, +, Add, "addition";
    sub_promoted, -, Sub, "subtraction";
    mul_promoted, *, Mul, "multiplication";
    div_promoted, /, Div, "division";
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::{DType, NDArray, ShapeBuilder};

    #[test]
    fn exact_shape_arithmetic() {
        let a = NDArray::from(vec![1, 2, 3]);
        let b = NDArray::from(vec![10, 20, 30]);
        assert_eq!((&a + &b).to_vec(), vec![11, 22, 33]);
        assert_eq!((&b - &a).to_vec(), vec![9, 18, 27]);
        assert_eq!((&a * &b).to_vec(), vec![10, 40, 90]);
        assert_eq!((&b / &a).to_vec(), vec![10, 10, 10]);
        assert_eq!((&b % &NDArray::from(vec![3, 7, 4])).to_vec(), vec![1, 6, 2]);
        let c = NDArray::from(vec![1, 2]);
        assert_eq!(a.try_add(&c).unwrap_err().kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    #[should_panic]
    fn operator_panics_on_mismatch() {
        let a = NDArray::<f64>::zeros((2, 2));
        let b = NDArray::<f64>::zeros(4);
        let _ = &a + &b;
    }

    #[test]
    fn mixed_layouts() {
        let c = NDArray::from_vec((2, 3), vec![0., 1., 2., 3., 4., 5.]).unwrap();
        let f = NDArray::from_vec((2, 3).f(), vec![0., 3., 1., 4., 2., 5.]).unwrap();
        let d = &c - &f;
        assert!(d.iter().all(|&x| x == 0.));
        assert!(d.is_c_contiguous());
    }

    #[test]
    fn scalars_both_sides() {
        let a = NDArray::from(vec![1.0f64, 2.0, 4.0]);
        assert_eq!((&a * 2.0).to_vec(), vec![2.0, 4.0, 8.0]);
        assert_eq!((8.0 / &a).to_vec(), vec![8.0, 4.0, 2.0]);
        assert_eq!((1.0 - &a).to_vec(), vec![0.0, -1.0, -3.0]);
        let mut b = a.clone();
        b += 1.0;
        b *= &a;
        assert_eq!(b.to_vec(), vec![2.0, 6.0, 20.0]);
    }

    #[test]
    fn unary() {
        let a = NDArray::from(vec![1, -2]);
        assert_eq!((-&a).to_vec(), vec![-1, 2]);
        let m = NDArray::from(vec![true, false]);
        assert_eq!((!m).to_vec(), vec![false, true]);
    }

    #[test]
    fn comparisons() {
        let a = NDArray::from(vec![1, 5, 3]);
        let b = NDArray::from(vec![2, 5, 1]);
        assert_eq!(a.less(&b).unwrap().to_vec(), vec![true, false, false]);
        assert_eq!(a.equal(&b).unwrap().to_vec(), vec![false, true, false]);
        assert_eq!(a.greater_equal_scalar(3).to_vec(), vec![false, true, true]);
        assert_eq!(a.select_mask(&a.not_equal_scalar(5)).unwrap().to_vec(), vec![1, 3]);
    }

    #[test]
    fn promotion() {
        let a = NDArray::from(vec![1u8, 2, 3]);
        let b = NDArray::from(vec![100i32, 200, 300]);
        let c = a.add_promoted(&b).unwrap();
        assert_eq!(c.dtype(), DType::Int32);
        assert_eq!(c.to_vec(), vec![101, 202, 303]);
        let f = NDArray::from(vec![0.5f64; 3]);
        let d = b.mul_promoted(&f).unwrap();
        assert_eq!(d.to_vec(), vec![50.0, 100.0, 150.0]);
    }

    #[test]
    fn assign_ops_on_view_panic() {
        let a = NDArray::from(vec![1, 2]);
        let mut v = a.view();
        let r = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| v += 1));
        assert!(r.is_err());
    }
}
