// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Plain text persistence.
//!
//! An array is stored as three sections: the shape, the number of
//! dimensions and the elements in logical (row-major) order, each element
//! followed by a comma.
//!
//! ```text
//! ndshape=[2, 3]
//! ndim=[2]
//! 1,2,3,4,5,6,
//! ```
//!
//! Elements are written with `Display` and read back with `FromStr`. For
//! integers and floats this is lossless: floats print the shortest
//! representation that parses to the same value.

use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::error::{from_kind, ErrorKind, NdResult};
use crate::{Element, NDArray, Shape};

const SHAPE_KEY: &str = "ndshape=";
const NDIM_KEY: &str = "ndim=";

/// Element types that can be written to and read from text.
pub trait TextElement: Element + fmt::Display + FromStr {}

impl<T> TextElement for T where T: Element + fmt::Display + FromStr {}

fn parse_error(msg: impl Into<String>) -> crate::ArrayError {
    from_kind(ErrorKind::Parse, msg)
}

/// Parse `key=[a, b, ...]` into its list of extents.
fn parse_list(line: Option<&str>, key: &str) -> NdResult<Vec<usize>> {
    let line = line.ok_or_else(|| parse_error(format!("missing `{}` line", key)))?.trim();
    let body = line
        .strip_prefix(key)
        .and_then(|rest| rest.trim().strip_prefix('['))
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| parse_error(format!("expected `{}[...]`, found {:?}", key, line)))?;
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    body.split(',')
        .map(|tok| {
            let tok = tok.trim();
            tok.parse::<usize>()
                .map_err(|_| parse_error(format!("`{}`: invalid extent {:?}", key, tok)))
        })
        .collect()
}

/// Render `a` in the text format.
pub fn to_text<A: TextElement>(a: &NDArray<A>) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = writeln!(out, "{}{:?}", SHAPE_KEY, a.shape());
    let _ = writeln!(out, "{}[{}]", NDIM_KEY, a.ndim());
    for x in a.iter() {
        let _ = write!(out, "{},", x);
    }
    out.push('\n');
    out
}

/// Parse an array from the text format. The result is C-contiguous.
///
/// **Errors** with `ErrorKind::Parse` if a section is missing or malformed,
/// if `ndim` disagrees with the shape, if an element does not parse or if
/// the element count is not the size of the shape.
pub fn from_text<A: TextElement>(text: &str) -> NdResult<NDArray<A>> {
    let mut lines = text.lines();
    let shape = parse_list(lines.next(), SHAPE_KEY)?;
    let ndim = parse_list(lines.next(), NDIM_KEY)?;
    if ndim.len() != 1 || ndim[0] != shape.len() {
        return Err(parse_error(format!(
            "`{}` {:?} does not match shape {:?}",
            NDIM_KEY, ndim, shape
        )));
    }
    let shape = Shape::new(shape);
    let mut data = Vec::with_capacity(shape.size());
    for line in lines {
        for tok in line.split(',') {
            let tok = tok.trim();
            if tok.is_empty() {
                continue;
            }
            let x = tok
                .parse::<A>()
                .map_err(|_| parse_error(format!("invalid {} element {:?}", A::DTYPE, tok)))?;
            data.push(x);
        }
    }
    if data.len() != shape.size() {
        return Err(parse_error(format!(
            "shape {} needs {} elements, found {}",
            shape,
            shape.size(),
            data.len()
        )));
    }
    Ok(NDArray::from_vec_c(shape, data))
}

/// Write `a` to the file at `path` in the text format.
///
/// **Errors** with `ErrorKind::Io` if the file cannot be written.
pub fn savetxt<A: TextElement, P: AsRef<Path>>(a: &NDArray<A>, path: P) -> NdResult<()> {
    debug!("savetxt: {} elements of shape {:?} to {}", a.size(), a.shape(), path.as_ref().display());
    fs::write(path, to_text(a))?;
    Ok(())
}

/// Read an array from the file at `path`.
///
/// **Errors** with `ErrorKind::Io` if the file cannot be read and with
/// `ErrorKind::Parse` if its contents are malformed.
pub fn loadtxt<A: TextElement, P: AsRef<Path>>(path: P) -> NdResult<NDArray<A>> {
    debug!("loadtxt: reading {}", path.as_ref().display());
    let text = fs::read_to_string(path)?;
    from_text(&text)
}

impl<A: TextElement> NDArray<A> {
    /// See [`io::to_text`](to_text).
    pub fn to_text(&self) -> String {
        to_text(self)
    }

    /// See [`io::from_text`](from_text).
    pub fn from_text(text: &str) -> NdResult<Self> {
        from_text(text)
    }

    /// See [`io::savetxt`](savetxt).
    pub fn savetxt<P: AsRef<Path>>(&self, path: P) -> NdResult<()> {
        savetxt(self, path)
    }

    /// See [`io::loadtxt`](loadtxt).
    pub fn loadtxt<P: AsRef<Path>>(path: P) -> NdResult<Self> {
        loadtxt(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShapeBuilder;

    #[test]
    fn text_layout() {
        let a = NDArray::from_vec((2, 3), vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(a.to_text(), "ndshape=[2, 3]\nndim=[2]\n1,2,3,4,5,6,\n");
    }

    #[test]
    fn logical_order_for_f_layout() {
        let a = NDArray::from_vec((2, 2).f(), vec![1, 3, 2, 4]).unwrap();
        assert_eq!(a.to_text(), "ndshape=[2, 2]\nndim=[2]\n1,2,3,4,\n");
        let b = NDArray::<i32>::from_text(&a.to_text()).unwrap();
        assert!(b.is_c_contiguous());
        assert_eq!(b.to_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn floats_are_lossless() {
        let v = vec![0.1, 1.0 / 3.0, -2.5e-300, f64::MAX, 1e16];
        let a = NDArray::from(v.clone());
        let b = NDArray::<f64>::from_text(&a.to_text()).unwrap();
        assert_eq!(b.to_vec(), v);
    }

    #[test]
    fn scalar_and_empty() {
        let z = NDArray::from_scalar(7u8);
        assert_eq!(z.to_text(), "ndshape=[]\nndim=[0]\n7,\n");
        assert_eq!(NDArray::<u8>::from_text(&z.to_text()).unwrap().to_scalar().unwrap(), 7);
        let e = NDArray::<f32>::zeros((0, 3));
        let back = NDArray::<f32>::from_text(&e.to_text()).unwrap();
        assert_eq!(back.shape(), &[0, 3]);
    }

    #[test]
    fn malformed_input() {
        for text in [
            "",
            "shape=[2]\nndim=[1]\n1,2,",
            "ndshape=[2]\nndim=[2]\n1,2,",
            "ndshape=[2]\nndim=[1]\n1,x,",
            "ndshape=[2]\nndim=[1]\n1,2,3,",
            "ndshape=[2, -1]\nndim=[2]\n",
        ] {
            let e = NDArray::<i32>::from_text(text).unwrap_err();
            assert_eq!(e.kind(), ErrorKind::Parse, "{:?}", text);
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let e = NDArray::<f64>::loadtxt("/nonexistent/ndstrided/array.txt").unwrap_err();
        assert_eq!(e.kind(), ErrorKind::Io);
    }

    #[test]
    fn save_and_load() {
        let path = std::env::temp_dir().join(format!("ndstrided-io-{}.txt", std::process::id()));
        let a = NDArray::from_shape_fn((3, 2), |ix| (ix[0] * 10 + ix[1]) as i64);
        a.savetxt(&path).unwrap();
        let b = NDArray::<i64>::loadtxt(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(b.shape(), a.shape());
        assert_eq!(b.to_vec(), a.to_vec());
    }
}
