// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::{Matrix, NDArray};

/// Write the elements of `view` in logical order, nested in brackets.
fn format_array<A, F>(view: &NDArray<A>, f: &mut fmt::Formatter, mut format: F) -> fmt::Result
where
    F: FnMut(&A, &mut fmt::Formatter) -> fmt::Result,
{
    let ndim = view.ndim();
    let mut last_index = vec![0; ndim];
    for _ in 0..ndim {
        f.write_str("[")?;
    }
    let mut first = true;
    // Use the indexed iterator, and take the index wraparounds as cues for
    // when to add []'s and how many to add.
    for (index, elt) in view.indexed_iter() {
        let take_n = if ndim == 0 { 0 } else { ndim - 1 };
        for (i, (a, b)) in index.iter().take(take_n).zip(&last_index).enumerate() {
            if a != b {
                // # of ['s needed
                let n = ndim - i - 1;
                for _ in 0..n {
                    f.write_str("]")?;
                }
                f.write_str(",\n")?;
                for _ in 0..ndim - n {
                    f.write_str(" ")?;
                }
                for _ in 0..n {
                    f.write_str("[")?;
                }
                first = true;
                break;
            }
        }
        if !first {
            f.write_str(", ")?;
        }
        first = false;
        format(elt, f)?;
        last_index = index;
    }
    for _ in 0..ndim {
        f.write_str("]")?;
    }
    Ok(())
}

/// Format the array using `Debug`: the elements in logical order followed
/// by the shape, strides, offset and flags.
impl<A: fmt::Debug> fmt::Debug for NDArray<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        format_array(self, f, <_>::fmt)?;
        write!(
            f,
            " shape={:?}, strides={:?}, offset={}, flags={:?}",
            self.shape(),
            self.strides(),
            self.offset(),
            self.flags()
        )
    }
}

impl<A: fmt::Debug> fmt::Debug for Matrix<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("[")?;
        for i in 0..self.rows() {
            if i > 0 {
                f.write_str(",\n ")?;
            }
            f.write_str("[")?;
            for j in 0..self.cols() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                self[(i, j)].fmt(f)?;
            }
            f.write_str("]")?;
        }
        write!(f, "] rows={}, cols={}", self.rows(), self.cols())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Matrix, NDArray, ShapeBuilder};

    #[test]
    fn debug_nested_rows() {
        let a = NDArray::from_vec((2, 3), vec![1, 2, 3, 4, 5, 6]).unwrap();
        let s = format!("{:?}", a);
        assert!(s.starts_with("[[1, 2, 3],\n [4, 5, 6]] shape=[2, 3], strides=[3, 1], offset=0"));
        assert!(s.contains("C_CONTIGUOUS"));
    }

    #[test]
    fn debug_logical_order_for_f_layout() {
        let a = NDArray::from_vec((2, 2).f(), vec![1, 3, 2, 4]).unwrap();
        let s = format!("{:?}", a);
        assert!(s.starts_with("[[1, 2],\n [3, 4]] shape=[2, 2], strides=[1, 2]"));
        assert!(s.contains("F_CONTIGUOUS"));
    }

    #[test]
    fn debug_three_dims() {
        let a = NDArray::from_vec((2, 1, 2), vec![1, 2, 3, 4]).unwrap();
        let s = format!("{:?}", a);
        assert!(s.starts_with("[[[1, 2]],\n [[3, 4]]] shape=[2, 1, 2]"));
    }

    #[test]
    fn debug_scalar_and_matrix() {
        let z = NDArray::from_scalar(7);
        assert!(format!("{:?}", z).starts_with("7 shape=[]"));
        let m = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(format!("{:?}", m), "[[1, 2],\n [3, 4]] rows=2, cols=2");
    }
}
