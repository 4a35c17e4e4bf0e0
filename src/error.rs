// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;

/// An error produced by an array operation.
///
/// Every error carries an [`ErrorKind`] for programmatic matching and a
/// message naming the operation, the offending values and the constraint
/// that was violated.
#[derive(Clone, Debug)]
pub struct ArrayError {
    // we want to be able to change this representation later
    kind: ErrorKind,
    msg: String,
}

/// Result alias used by fallible array operations.
pub type NdResult<T> = Result<T, ArrayError>;

impl ArrayError {
    /// Create a new error of `kind` with a descriptive message.
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        ArrayError {
            kind,
            msg: msg.into(),
        }
    }

    /// Return the `ErrorKind` of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return the message of this error, without the kind prefix.
    pub fn message(&self) -> &str {
        &self.msg
    }
}

/// Error code for an array error.
///
/// This enumeration is not exhaustive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// operand shapes disagree where an exact match is required
    ShapeMismatch,
    /// a linear or per-axis index is outside the valid range
    IndexOutOfBounds,
    /// zero step, negative bound or empty range in a slice
    InvalidSliceSpec,
    /// wrong number of indices or selectors for the array's rank
    DimensionalityMismatch,
    /// the operation is not defined for this array or element type
    UnsupportedOperation,
    /// attempt to write through a read-only view
    NotWriteable,
    /// a pivot fell below the configured singularity tolerance
    SingularMatrix,
    /// malformed text input
    Parse,
    /// failure reading or writing a file
    Io,
}

impl ErrorKind {
    fn description(self) -> &'static str {
        match self {
            ErrorKind::ShapeMismatch => "shape mismatch",
            ErrorKind::IndexOutOfBounds => "index out of bounds",
            ErrorKind::InvalidSliceSpec => "invalid slice",
            ErrorKind::DimensionalityMismatch => "dimensionality mismatch",
            ErrorKind::UnsupportedOperation => "unsupported operation",
            ErrorKind::NotWriteable => "array is not writeable",
            ErrorKind::SingularMatrix => "singular matrix",
            ErrorKind::Parse => "parse error",
            ErrorKind::Io => "i/o error",
        }
    }
}

impl PartialEq for ArrayError {
    #[inline(always)]
    fn eq(&self, rhs: &Self) -> bool {
        self.kind == rhs.kind
    }
}

impl Error for ArrayError {}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind.description(), self.msg)
    }
}

impl From<std::io::Error> for ArrayError {
    fn from(err: std::io::Error) -> Self {
        ArrayError::new(ErrorKind::Io, err.to_string())
    }
}

#[inline(always)]
pub(crate) fn from_kind(kind: ErrorKind, msg: impl Into<String>) -> ArrayError {
    ArrayError::new(kind, msg)
}

pub(crate) fn shape_mismatch(op: &str, expected: &[usize], found: &[usize]) -> ArrayError {
    from_kind(
        ErrorKind::ShapeMismatch,
        format!("{}: expected shape {:?}, found {:?}", op, expected, found),
    )
}

pub(crate) fn index_out_of_bounds(op: &str, index: isize, axis: Option<usize>, len: usize) -> ArrayError {
    let msg = match axis {
        Some(axis) => format!(
            "{}: index {} is out of bounds for axis {} with size {} (valid range [-{}, {}))",
            op, index, axis, len, len, len
        ),
        None => format!(
            "{}: index {} is out of bounds for array of size {} (valid range [-{}, {}))",
            op, index, len, len, len
        ),
    };
    from_kind(ErrorKind::IndexOutOfBounds, msg)
}

pub(crate) fn ndim_mismatch(op: &str, expected: usize, found: usize) -> ArrayError {
    from_kind(
        ErrorKind::DimensionalityMismatch,
        format!("{}: expected {} indices, got {}", op, expected, found),
    )
}

pub(crate) fn unsupported(msg: impl Into<String>) -> ArrayError {
    from_kind(ErrorKind::UnsupportedOperation, msg)
}

pub(crate) fn not_writeable(op: &str) -> ArrayError {
    from_kind(
        ErrorKind::NotWriteable,
        format!("{}: destination is a read-only view", op),
    )
}

pub(crate) fn require_2d(op: &str, ndim: usize) -> Result<(), ArrayError> {
    if ndim != 2 {
        return Err(unsupported(format!(
            "{}: requires a 2-dimensional array, got {} dimensions",
            op, ndim
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let e = shape_mismatch("add", &[2, 3], &[3, 2]);
        assert_eq!(e.kind(), ErrorKind::ShapeMismatch);
        assert_eq!(
            e.to_string(),
            "shape mismatch: add: expected shape [2, 3], found [3, 2]"
        );
    }

    #[test]
    fn equality_is_by_kind() {
        let a = from_kind(ErrorKind::Parse, "a");
        let b = from_kind(ErrorKind::Parse, "b");
        assert_eq!(a, b);
        assert_ne!(a, unsupported("a"));
    }

    #[test]
    fn out_of_bounds_names_axis() {
        let e = index_out_of_bounds("item", 5, Some(1), 3);
        assert!(e.message().contains("axis 1"));
        assert!(e.message().contains("index 5"));
    }
}
