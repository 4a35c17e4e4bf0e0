use quickcheck::quickcheck;

use ndstrided::prelude::*;
use ndstrided::{ErrorKind, Mask};

/// Small shape from arbitrary input: at most four axes of extent 1..=4.
fn small_shape(dims: &[u8]) -> Vec<usize> {
    dims.iter().take(4).map(|&d| d as usize % 4 + 1).collect()
}

fn counting(shape: &[usize], order: Order) -> NDArray<usize> {
    let n: usize = shape.iter().product();
    let c = NDArray::from_vec(shape.to_vec(), (0..n).collect()).unwrap();
    c.as_contiguous(order)
}

quickcheck! {
    fn full_slice_round_trip(dims: Vec<u8>, f_order: bool) -> bool {
        let shape = small_shape(&dims);
        let order = if f_order { Order::F } else { Order::C };
        let a = counting(&shape, order);
        let full = vec![AxisSelector::from(..); a.ndim()];
        let b = a.slice(&full).unwrap();
        b.shape() == a.shape() && b == a && b.owns_data()
    }

    fn item_is_layout_independent(dims: Vec<u8>) -> bool {
        let shape = small_shape(&dims);
        let c = counting(&shape, Order::C);
        let f = counting(&shape, Order::F);
        (0..c.size() as isize).all(|i| c.item(i).unwrap() == f.item(i).unwrap() && c.item(i).unwrap() == i as usize)
    }

    fn slice_view_matches_slice(dims: Vec<u8>, start: u8, step: u8) -> bool {
        let shape = small_shape(&dims);
        if shape.is_empty() {
            return true;
        }
        let a = counting(&shape, Order::C);
        let start = start as usize % shape[0];
        let step = step as usize % 3 + 1;
        let sel = s![start..shape[0];step];
        let copy = a.slice(&sel).unwrap();
        let view = a.slice_view(&sel).unwrap();
        copy == view && view.is_view() && copy.shape()[0] == (shape[0] - start - 1) / step + 1
    }
}

#[test]
fn slice_shape_law() {
    let a = NDArray::<f64>::zeros((4, 4));
    assert_eq!(a.slice(&s![1..3, 1..3]).unwrap().shape(), &[2, 2]);
    assert_eq!(a.slice(&s![1..4;2, ..]).unwrap().shape(), &[2, 4]);
}

#[test]
fn degenerate_axis_policy() {
    let a = NDArray::from_shape_fn((3, 3), |ix| ix[0] * 3 + ix[1]);
    let scalar = a.slice(&s![1, 1]).unwrap();
    assert_eq!(scalar.ndim(), 0);
    assert_eq!(scalar.to_scalar().unwrap(), 4);
    let unit = a.slice(&s![1..2, 1..2]).unwrap();
    assert_eq!(unit.shape(), &[1, 1]);
    assert_eq!(unit.item(0).unwrap(), 4);
    assert_ne!(scalar, unit);
}

#[test]
fn negative_bounds_are_rejected() {
    let a = NDArray::<i32>::zeros((4, 4));
    let neg_start = [AxisSelector::Range(Slice::new(Some(-1), None, 1))];
    let neg_end = [AxisSelector::Range(Slice::new(None, Some(-1), 1))];
    assert_eq!(a.slice(&neg_start).unwrap_err().kind(), ErrorKind::InvalidSliceSpec);
    assert_eq!(a.slice(&neg_end).unwrap_err().kind(), ErrorKind::InvalidSliceSpec);
    assert_eq!(a.slice_view(&neg_start).unwrap_err().kind(), ErrorKind::InvalidSliceSpec);
    assert_eq!(a.slice(&s![0..4;0]).unwrap_err().kind(), ErrorKind::InvalidSliceSpec);
    assert_eq!(a.slice(&s![2..2]).unwrap_err().kind(), ErrorKind::InvalidSliceSpec);
    assert_eq!(a.slice(&s![0..5]).unwrap_err().kind(), ErrorKind::InvalidSliceSpec);
    assert_eq!(a.slice(&s![4..]).unwrap_err().kind(), ErrorKind::InvalidSliceSpec);
    assert_eq!(a.slice(&s![.., 4]).unwrap_err().kind(), ErrorKind::IndexOutOfBounds);
    assert_eq!(a.slice(&s![.., .., ..]).unwrap_err().kind(), ErrorKind::DimensionalityMismatch);
}

#[test]
fn slicing_copies() {
    let a = NDArray::from_shape_fn((3, 4), |ix| ix[0] * 4 + ix[1]);
    let mut b = a.slice(&s![0..2, 1..3]).unwrap();
    b.fill(0).unwrap();
    assert_eq!(a.item_at(&[0, 1]).unwrap(), 1);
    assert!(!a.buffer().ptr_eq(b.buffer()));
}

#[test]
fn slice_strides_follow_source_order() {
    let c = NDArray::from_shape_fn((4, 5), |ix| ix[0] * 5 + ix[1]);
    let b = c.slice(&s![1..4, 0..5;2]).unwrap();
    assert_eq!(b.shape(), &[3, 3]);
    assert_eq!(b.strides(), &[3, 1]);
    assert_eq!(b.to_vec(), vec![5, 7, 9, 10, 12, 14, 15, 17, 19]);

    let f = c.as_contiguous(Order::F);
    let bf = f.slice(&s![1..4, 0..5;2]).unwrap();
    assert_eq!(bf.strides(), &[1, 3]);
    assert_eq!(bf, b);
}

#[test]
fn slice_view_offset_and_strides() {
    let a = NDArray::from_shape_fn((4, 5), |ix| ix[0] * 5 + ix[1]);
    let v = a.slice_view(&s![1..4;2, 2..]).unwrap();
    assert_eq!(v.offset(), 7);
    assert_eq!(v.strides(), &[10, 1]);
    assert_eq!(v.to_vec(), vec![7, 8, 9, 17, 18, 19]);
    // a view of a view
    let w = v.slice_view(&s![1, 1..]).unwrap();
    assert_eq!(w.to_vec(), vec![18, 19]);
}

#[test]
fn integer_indexing() {
    let a = NDArray::from_shape_fn((2, 3), |ix| ix[0] * 3 + ix[1]);
    let r = a.at(1).unwrap();
    assert_eq!(r.shape(), &[3]);
    assert_eq!(r.to_vec(), vec![3, 4, 5]);
    let x = r.at(2).unwrap();
    assert_eq!(x.ndim(), 0);
    assert_eq!(x.to_scalar().unwrap(), 5);
    assert_eq!(x.at(0).unwrap_err().kind(), ErrorKind::UnsupportedOperation);
    assert_eq!(a.at(2).unwrap_err().kind(), ErrorKind::IndexOutOfBounds);

    let col = a.index_axis(Axis(1), 2).unwrap();
    assert_eq!(col.to_vec(), vec![2, 5]);
    assert!(a.index_axis(Axis(2), 0).is_err());
}

#[test]
fn mixed_selectors() {
    let a = NDArray::from_shape_fn((2, 3, 4), |ix| ix[0] * 100 + ix[1] * 10 + ix[2]);
    let b = a.slice(&s![1, .., 1..4;2]).unwrap();
    assert_eq!(b.shape(), &[3, 2]);
    assert_eq!(b.to_vec(), vec![101, 103, 111, 113, 121, 123]);
    let c = a.slice(&s![1, 2, 3]).unwrap();
    assert_eq!(c.ndim(), 0);
    assert_eq!(c.to_scalar().unwrap(), 123);
    // missing trailing selectors take the whole axis
    assert_eq!(a.slice(&s![0]).unwrap().shape(), &[3, 4]);
    let ranges = a.slice_ranges(&[Slice::from(0..1), Slice::from(1..3)]).unwrap();
    assert_eq!(ranges.shape(), &[1, 2, 4]);
}

#[test]
fn select_rows_keeps_order() {
    let a = NDArray::from_shape_fn((4, 2), |ix| ix[0] * 2 + ix[1]);
    let b = a.select_rows(&[3, 0, 3]).unwrap();
    assert_eq!(b.shape(), &[3, 2]);
    assert_eq!(b.to_vec(), vec![6, 7, 0, 1, 6, 7]);
    assert_eq!(a.select_rows(&[4]).unwrap_err().kind(), ErrorKind::IndexOutOfBounds);
    assert_eq!(a.select_rows(&[]).unwrap().shape(), &[0, 2]);

    // same rows from a transposed view
    let t = a.t().as_contiguous(Order::C).t();
    assert_eq!(t.select_rows(&[3, 0, 3]).unwrap(), b);
}

#[test]
fn row_mask() {
    let a = NDArray::from_shape_fn((3, 2), |ix| ix[0] * 2 + ix[1]);
    let m: Mask = NDArray::from(vec![true, false, true]);
    let b = a.select_mask(&m).unwrap();
    assert_eq!(b.shape(), &[2, 2]);
    assert_eq!(b.to_vec(), vec![0, 1, 4, 5]);
    let bad: Mask = NDArray::from(vec![true, false]);
    assert_eq!(a.select_mask(&bad).unwrap_err().kind(), ErrorKind::ShapeMismatch);
}

#[test]
fn element_mask() {
    let a = NDArray::from_shape_fn((3, 3), |ix| (ix[0] * 3 + ix[1]) as i32);
    let m = a.greater_scalar(4);
    let b = a.select_mask(&m).unwrap();
    assert_eq!(b.shape(), &[4]);
    assert_eq!(b.to_vec(), vec![5, 6, 7, 8]);
    let none = a.select_mask(&a.less_scalar(0)).unwrap();
    assert_eq!(none.shape(), &[0]);
}

#[test]
fn element_mask_scans_storage_order() {
    // An F-ordered source comes out in column-major order, not in logical
    // order; the mask is always read at each element's own coordinate.
    let a = NDArray::from_vec((2, 2).f(), vec![1, 3, 2, 4]).unwrap();
    let m = a.greater_scalar(1);
    assert!(m.is_c_contiguous());
    let picked = a.select_mask(&m).unwrap();
    assert_eq!(picked.to_vec(), vec![3, 2, 4]);

    let mf = m.as_contiguous(Order::F);
    let picked = a.select_mask(&mf).unwrap();
    assert_eq!(picked.to_vec(), vec![3, 2, 4]);

    // a non-contiguous source is walked in logical order
    let src = NDArray::from_shape_fn((2, 3), |ix| ix[0] * 3 + ix[1]);
    let sv = src.slice_view(&s![.., 0..3;2]).unwrap();
    assert!(!sv.is_c_contiguous() && !sv.is_f_contiguous());
    let picked = sv.select_mask(&sv.greater_scalar(0)).unwrap();
    assert_eq!(picked.to_vec(), vec![2, 3, 5]);
}

#[test]
fn mask_layout_does_not_change_selection() {
    let a = NDArray::from_shape_fn((2, 3), |ix| (ix[0] * 3 + ix[1]) as i32);
    let m = a.greater_equal_scalar(2).as_contiguous(Order::F);
    assert!(m.is_f_contiguous() && !m.is_c_contiguous());
    assert_eq!(a.select_mask(&m).unwrap().to_vec(), vec![2, 3, 4, 5]);

    let mut b = a.clone();
    b.fill_mask(&a.less_scalar(2).as_contiguous(Order::F), -1).unwrap();
    assert_eq!(b.to_vec(), vec![-1, -1, 2, 3, 4, 5]);

    let mut c = a.clone();
    c.set_mask(&m, &NDArray::from(vec![20, 30, 40, 50])).unwrap();
    assert_eq!(c.to_vec(), vec![0, 1, 20, 30, 40, 50]);
}
