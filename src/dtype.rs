// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Element types and the dtype promotion lattice.

use std::fmt;

use num_complex::Complex;

/// Runtime tag of an element type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Isize,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Usize,
    Float32,
    Float64,
    /// `Complex<f32>`
    Complex64,
    /// `Complex<f64>`
    Complex128,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Kind {
    Bool,
    Unsigned,
    Signed,
    Float,
    Complex,
}

impl DType {
    fn kind_bits(self) -> (Kind, u32) {
        match self {
            DType::Bool => (Kind::Bool, 1),
            DType::Int8 => (Kind::Signed, 8),
            DType::Int16 => (Kind::Signed, 16),
            DType::Int32 => (Kind::Signed, 32),
            DType::Int64 | DType::Isize => (Kind::Signed, 64),
            DType::UInt8 => (Kind::Unsigned, 8),
            DType::UInt16 => (Kind::Unsigned, 16),
            DType::UInt32 => (Kind::Unsigned, 32),
            DType::UInt64 | DType::Usize => (Kind::Unsigned, 64),
            DType::Float32 => (Kind::Float, 32),
            DType::Float64 => (Kind::Float, 64),
            // bits of each component
            DType::Complex64 => (Kind::Complex, 32),
            DType::Complex128 => (Kind::Complex, 64),
        }
    }

    fn from_kind_bits(kind: Kind, bits: u32) -> DType {
        match (kind, bits) {
            (Kind::Bool, _) => DType::Bool,
            (Kind::Signed, 8) => DType::Int8,
            (Kind::Signed, 16) => DType::Int16,
            (Kind::Signed, 32) => DType::Int32,
            (Kind::Signed, _) => DType::Int64,
            (Kind::Unsigned, 8) => DType::UInt8,
            (Kind::Unsigned, 16) => DType::UInt16,
            (Kind::Unsigned, 32) => DType::UInt32,
            (Kind::Unsigned, _) => DType::UInt64,
            (Kind::Float, 32) => DType::Float32,
            (Kind::Float, _) => DType::Float64,
            (Kind::Complex, 32) => DType::Complex64,
            (Kind::Complex, _) => DType::Complex128,
        }
    }

    /// Size of one element in bytes.
    pub fn itemsize(self) -> usize {
        match self {
            DType::Bool | DType::Int8 | DType::UInt8 => 1,
            DType::Int16 | DType::UInt16 => 2,
            DType::Int32 | DType::UInt32 | DType::Float32 => 4,
            DType::Int64 | DType::UInt64 | DType::Float64 | DType::Complex64 => 8,
            DType::Isize | DType::Usize => std::mem::size_of::<usize>(),
            DType::Complex128 => 16,
        }
    }

    pub fn is_bool(self) -> bool {
        self == DType::Bool
    }

    pub fn is_integer(self) -> bool {
        matches!(self.kind_bits().0, Kind::Signed | Kind::Unsigned)
    }

    pub fn is_float(self) -> bool {
        matches!(self.kind_bits().0, Kind::Float)
    }

    pub fn is_complex(self) -> bool {
        matches!(self.kind_bits().0, Kind::Complex)
    }

    /// The result type of a binary operation between `a` and `b`: the least
    /// type in the promotion lattice that both convert into.
    ///
    /// `bool < integers < floats < complex`; within integers a wider type
    /// absorbs a narrower one of the same signedness, and a signed/unsigned
    /// pair of equal width moves to the next wider signed type (`u64` with
    /// any signed type becomes `Float64`). Integers of at most 16 bits keep
    /// `Float32`; wider integers push floats to `Float64`.
    pub fn promote(a: DType, b: DType) -> DType {
        if a == b {
            return a;
        }
        let (ka, wa) = a.kind_bits();
        let (kb, wb) = b.kind_bits();
        // order so that `ka <= kb`
        let ((ka, wa), (kb, wb)) = if ka <= kb { ((ka, wa), (kb, wb)) } else { ((kb, wb), (ka, wa)) };
        match (ka, kb) {
            (Kind::Bool, _) => DType::from_kind_bits(kb, wb),
            (Kind::Unsigned, Kind::Unsigned) | (Kind::Signed, Kind::Signed) => {
                DType::from_kind_bits(ka, wa.max(wb))
            }
            (Kind::Unsigned, Kind::Signed) => {
                if wb > wa {
                    DType::from_kind_bits(Kind::Signed, wb)
                } else if wa < 64 {
                    DType::from_kind_bits(Kind::Signed, wa * 2)
                } else {
                    DType::Float64
                }
            }
            (Kind::Unsigned, Kind::Float) | (Kind::Signed, Kind::Float) => {
                DType::from_kind_bits(Kind::Float, float_bits_for_int(wa).max(wb))
            }
            (Kind::Unsigned, Kind::Complex) | (Kind::Signed, Kind::Complex) => {
                DType::from_kind_bits(Kind::Complex, float_bits_for_int(wa).max(wb))
            }
            (Kind::Float, Kind::Float) | (Kind::Float, Kind::Complex) | (Kind::Complex, Kind::Complex) => {
                DType::from_kind_bits(kb, wa.max(wb))
            }
            _ => unreachable!("kinds are ordered"),
        }
    }
}

fn float_bits_for_int(bits: u32) -> u32 {
    if bits <= 16 {
        32
    } else {
        64
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            DType::Bool => "bool",
            DType::Int8 => "int8",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::Isize => "isize",
            DType::UInt8 => "uint8",
            DType::UInt16 => "uint16",
            DType::UInt32 => "uint32",
            DType::UInt64 => "uint64",
            DType::Usize => "usize",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Complex64 => "complex64",
            DType::Complex128 => "complex128",
        };
        f.write_str(name)
    }
}

/// Types that can be stored in an [`NDArray`](crate::NDArray).
pub trait Element: Clone + Default + fmt::Debug + Send + Sync + 'static {
    const DTYPE: DType;
}

macro_rules! impl_element {
    ($($t:ty => $d:ident),* $(,)?) => {
        $(
        impl Element for $t {
            const DTYPE: DType = DType::$d;
        }
        )*
    };
}

impl_element! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    isize => Isize,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    usize => Usize,
    f32 => Float32,
    f64 => Float64,
    Complex<f32> => Complex64,
    Complex<f64> => Complex128,
}

/// Compile-time dtype promotion: `Output` is the join of `Self` and `Rhs`
/// in the promotion lattice (see [`DType::promote`]).
pub trait Promote<Rhs: Element>: Element {
    type Output: Element;
}

macro_rules! impl_promote_same {
    ($($t:ty),*) => {
        $(
        impl Promote<$t> for $t {
            type Output = $t;
        }
        )*
    };
}

macro_rules! impl_promote {
    ($(($a:ty, $b:ty) => $out:ty),* $(,)?) => {
        $(
        impl Promote<$b> for $a {
            type Output = $out;
        }
        impl Promote<$a> for $b {
            type Output = $out;
        }
        )*
    };
}

impl_promote_same!(u8, i32, i64, f32, f64);

impl_promote! {
    (u8, i32) => i32,
    (u8, i64) => i64,
    (u8, f32) => f32,
    (u8, f64) => f64,
    (i32, i64) => i64,
    (i32, f32) => f64,
    (i32, f64) => f64,
    (i64, f32) => f64,
    (i64, f64) => f64,
    (f32, f64) => f64,
}
