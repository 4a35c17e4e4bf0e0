// Flags is a bitset describing an array's memory layout classification and
// buffer ownership. It is recomputed whenever geometry changes.

use std::fmt;

use crate::dimension::{self, Shape, Strides};

/// Layout and ownership flags of an array.
///
/// - `C_CONTIGUOUS`: strides are the canonical row-major strides of the shape
/// - `F_CONTIGUOUS`: strides are the canonical column-major strides
/// - `OWNDATA`: the array is the designated owner of its buffer
/// - `WRITEABLE`: element writes are permitted
///
/// Both contiguity flags can be set at once only for arrays with at most one
/// axis.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Flags(u32);

pub const C_CONTIGUOUS: u32 = 0b0001;
pub const F_CONTIGUOUS: u32 = 0b0010;
pub const OWNDATA: u32 = 0b0100;
pub const WRITEABLE: u32 = 0b1000;

impl Flags {
    #[inline(always)]
    pub fn is(self, flag: u32) -> bool {
        self.0 & flag != 0
    }

    #[inline(always)]
    pub(crate) fn empty() -> Flags {
        Flags(0)
    }

    /// Return flags with `flag` also set
    #[inline(always)]
    pub(crate) fn also(self, flag: u32) -> Flags {
        Flags(self.0 | flag)
    }

    /// Return flags with `flag` cleared
    #[inline(always)]
    pub(crate) fn without(self, flag: u32) -> Flags {
        Flags(self.0 & !flag)
    }

    /// Classify `strides` against `shape` and attach the ownership bits.
    pub(crate) fn classify(shape: &Shape, strides: &Strides, owndata: bool, writeable: bool) -> Flags {
        let mut f = Flags::empty();
        if dimension::is_c_contiguous(shape, strides) {
            f = f.also(C_CONTIGUOUS);
        }
        if dimension::is_f_contiguous(shape, strides) {
            f = f.also(F_CONTIGUOUS);
        }
        if owndata {
            f = f.also(OWNDATA);
        }
        if writeable {
            f = f.also(WRITEABLE);
        }
        f
    }

    /// Build flags from explicit booleans, without any consistency check.
    pub fn from_bools(c_contiguous: bool, f_contiguous: bool, owndata: bool, writeable: bool) -> Flags {
        let mut f = Flags::empty();
        for (on, bit) in [
            (c_contiguous, C_CONTIGUOUS),
            (f_contiguous, F_CONTIGUOUS),
            (owndata, OWNDATA),
            (writeable, WRITEABLE),
        ] {
            if on {
                f = f.also(bit);
            }
        }
        f
    }

    #[inline]
    pub fn c_contiguous(self) -> bool {
        self.is(C_CONTIGUOUS)
    }

    #[inline]
    pub fn f_contiguous(self) -> bool {
        self.is(F_CONTIGUOUS)
    }

    #[inline]
    pub fn owndata(self) -> bool {
        self.is(OWNDATA)
    }

    #[inline]
    pub fn writeable(self) -> bool {
        self.is(WRITEABLE)
    }

    #[inline]
    pub fn is_contiguous(self) -> bool {
        self.is(C_CONTIGUOUS | F_CONTIGUOUS)
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names = [
            (C_CONTIGUOUS, "C_CONTIGUOUS"),
            (F_CONTIGUOUS, "F_CONTIGUOUS"),
            (OWNDATA, "OWNDATA"),
            (WRITEABLE, "WRITEABLE"),
        ];
        let mut first = true;
        for (bit, name) in names {
            if self.is(bit) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("(none)")?;
        }
        Ok(())
    }
}
