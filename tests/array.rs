#![allow(clippy::many_single_char_names, clippy::unreadable_literal)]

use defmac::defmac;
use ndstrided::layout::Flags;
use ndstrided::prelude::*;
use ndstrided::{DType, ErrorKind, Strides};

#[test]
fn test_shape_only_constructor() {
    let a = NDArray::<f64>::new((2, 3, 4));
    assert_eq!(a.shape(), &[2, 3, 4]);
    assert_eq!(a.strides(), &[12, 4, 1]);
    assert_eq!(a.ndim(), 3);
    assert_eq!(a.size(), 24);
    assert!(a.is_c_contiguous());
    assert!(!a.is_f_contiguous());
    assert!(a.owns_data());
    assert!(a.is_writeable());

    let f = NDArray::<f64>::new((2, 3, 4).f());
    assert_eq!(f.strides(), &[1, 2, 6]);
    assert!(f.is_f_contiguous());
    assert!(!f.is_c_contiguous());
}

#[test]
fn test_scalar_array() {
    let z = NDArray::from_scalar(3.5f32);
    assert_eq!(z.ndim(), 0);
    assert_eq!(z.size(), 1);
    assert_eq!(z.shape(), &[] as &[usize]);
    assert!(z.is_c_contiguous() && z.is_f_contiguous());
    assert_eq!(z.to_scalar().unwrap(), 3.5);
    assert_eq!(z.item(0).unwrap(), 3.5);
    assert_eq!(z.item_at(&[]).unwrap(), 3.5);
}

#[test]
fn test_1d_is_both_contiguous() {
    let a = NDArray::from(vec![1, 2, 3]);
    assert!(a.is_c_contiguous() && a.is_f_contiguous());
    let e = NDArray::<i32>::zeros(0);
    assert!(e.is_empty());
    assert!(e.is_c_contiguous() && e.is_f_contiguous());
}

#[test]
fn test_creation_routines() {
    let o = NDArray::<i64>::ones((2, 2));
    assert_eq!(o.to_vec(), vec![1; 4]);
    let z = NDArray::<u8>::zeros(3);
    assert_eq!(z.to_vec(), vec![0; 3]);
    let f = NDArray::full((1, 3), 7u16);
    assert_eq!(f.shape(), &[1, 3]);
    assert_eq!(f.to_vec(), vec![7; 3]);

    let eye = NDArray::<f64>::eye(3);
    for i in 0..3 {
        for j in 0..3 {
            assert_eq!(eye[[i, j]], if i == j { 1. } else { 0. });
        }
    }

    let r = NDArray::arange(0, 10, 3).unwrap();
    assert_eq!(r.to_vec(), vec![0, 3, 6, 9]);
    let r = NDArray::arange(0., 1., 0.25).unwrap();
    assert_eq!(r.to_vec(), vec![0., 0.25, 0.5, 0.75]);
    assert_eq!(NDArray::arange(0, 10, 0).unwrap_err().kind(), ErrorKind::InvalidSliceSpec);
    assert_eq!(NDArray::arange(5, 1, 1).unwrap().size(), 0);
}

#[test]
fn test_from_vec_checks_size() {
    let e = NDArray::from_vec((2, 3), vec![1, 2, 3]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::ShapeMismatch);
    let a = NDArray::try_from(vec![vec![1, 2], vec![3, 4]]).unwrap();
    assert_eq!(a.shape(), &[2, 2]);
    assert!(NDArray::try_from(vec![vec![1, 2], vec![3]]).is_err());
}

#[test]
fn test_with_strides_stages_geometry() {
    let a = NDArray::<i32>::with_strides((2, 2), 1, Strides::new(vec![4, 1])).unwrap();
    assert_eq!(a.offset(), 1);
    assert_eq!(a.strides(), &[4, 1]);
    assert_eq!(a.buffer().len(), 7);
    assert!(!a.is_c_contiguous());
    assert_eq!(a.to_vec(), vec![0; 4]);
}

#[test]
fn test_from_parts_keeps_flags() {
    let shape = Shape::new(vec![2, 3]);
    let strides = Strides::c_order(&shape);
    let flags = Flags::from_bools(true, false, true, true);
    let a = NDArray::<f32>::from_parts(shape.clone(), strides.clone(), 2, 6, flags).unwrap();
    assert_eq!(a.flags(), flags);
    assert_eq!(a.size(), 6);

    let bad = NDArray::<f32>::from_parts(shape.clone(), strides.clone(), 3, 6, flags);
    assert_eq!(bad.unwrap_err().kind(), ErrorKind::DimensionalityMismatch);
    let bad = NDArray::<f32>::from_parts(shape, strides, 2, 5, flags);
    assert_eq!(bad.unwrap_err().kind(), ErrorKind::ShapeMismatch);

    let z = NDArray::<u8>::from_parts(Shape::scalar(), Strides::new(vec![]), 0, 1, flags).unwrap();
    assert_eq!(z.ndim(), 0);
    assert_eq!(z.to_scalar().unwrap(), 0);
}

#[test]
fn test_from_raw_parts_is_a_read_only_view() {
    let data = vec![1., 2., 3., 4., 5., 6.];
    let v = unsafe { NDArray::from_raw_parts(data.as_ptr(), data.len(), (3, 2), Strides::new(vec![1, 3]), 0) }
        .unwrap();
    assert!(v.buffer().is_foreign());
    assert!(!v.owns_data() && !v.is_writeable());
    assert!(v.is_f_contiguous());
    assert_eq!(v.to_vec(), vec![1., 4., 2., 5., 3., 6.]);

    let mut w = v.view();
    assert_eq!(w.store(0, 9.).unwrap_err().kind(), ErrorKind::NotWriteable);

    // a copy owns its data
    let mut c = v.deep_copy();
    assert!(c.owns_data() && c.is_f_contiguous());
    c.store(0, 9.).unwrap();
    assert_eq!(data[0], 1.);

    let too_far = unsafe { NDArray::from_raw_parts(data.as_ptr(), data.len(), (3, 2), Strides::new(vec![2, 1]), 1) };
    assert_eq!(too_far.unwrap_err().kind(), ErrorKind::IndexOutOfBounds);
}

#[test]
fn test_deep_copy_is_independent() {
    let a = NDArray::from_shape_fn((3, 4), |ix| (ix[0] * 4 + ix[1]) as i32);
    let mut b = a.clone();
    b.itemset(0, 100).unwrap();
    assert_eq!(a.item(0).unwrap(), 0);
    assert_eq!(b.item(0).unwrap(), 100);
    assert!(!a.buffer().ptr_eq(b.buffer()));

    // a non-contiguous source is gathered into C order
    let t = a.slice_view(&s![.., 0..4;2]).unwrap();
    let c = t.deep_copy();
    assert!(c.is_c_contiguous() && c.owns_data());
    assert_eq!(c.to_vec(), vec![0, 2, 4, 6, 8, 10]);
}

#[test]
fn test_move_keeps_buffer() {
    let a = NDArray::from(vec![1u8, 2, 3]);
    let p = a.buffer().as_ptr();
    let b = a;
    assert_eq!(b.buffer().as_ptr(), p);
}

#[test]
fn test_views_share_buffer() {
    let mut a = NDArray::from_vec((2, 2), vec![1, 2, 3, 4]).unwrap();
    let v = a.view();
    assert!(v.is_view());
    assert!(v.buffer().ptr_eq(a.buffer()));
    assert_eq!(a.buffer().ref_count(), 2);

    // writing to the owner unshares it; the view keeps the old values
    a.itemset(0, 10).unwrap();
    assert_eq!(v.item(0).unwrap(), 1);
    assert_eq!(a.item(0).unwrap(), 10);
    drop(v);
    assert_eq!(a.buffer().ref_count(), 1);
}

#[test]
fn test_transpose_and_permute() {
    let a = NDArray::from_shape_fn((2, 3, 4), |ix| ix[0] * 100 + ix[1] * 10 + ix[2]);
    let t = a.t();
    assert_eq!(t.shape(), &[4, 3, 2]);
    assert!(t.is_f_contiguous() && !t.is_c_contiguous());
    assert_eq!(t.item_at(&[3, 2, 1]).unwrap(), 123);

    let p = a.permute_axes(&[1, 0, 2]).unwrap();
    assert_eq!(p.shape(), &[3, 2, 4]);
    assert_eq!(p.item_at(&[2, 1, 3]).unwrap(), 123);
    assert!(!p.is_c_contiguous() && !p.is_f_contiguous());
    assert_eq!(p.permute_axes(&[1, 0]).unwrap_err().kind(), ErrorKind::DimensionalityMismatch);
    assert_eq!(p.permute_axes(&[0, 0, 1]).unwrap_err().kind(), ErrorKind::UnsupportedOperation);

    let mut s = a.clone();
    s.swap_axes(0, 2);
    assert_eq!(s.shape(), &[4, 3, 2]);
    assert_eq!(s, t);
}

#[test]
fn test_reshape() {
    let a = NDArray::from_shape_fn((2, 3), |ix| ix[0] * 3 + ix[1]);
    let r = a.reshape((3, 2)).unwrap();
    assert_eq!(r.to_vec(), a.to_vec());
    assert_eq!(r.shape(), &[3, 2]);
    assert_eq!(a.reshape(5).unwrap_err().kind(), ErrorKind::ShapeMismatch);

    // reshape is in logical order, also through a transpose
    let rt = a.t().reshape(6).unwrap();
    assert_eq!(rt.to_vec(), vec![0, 3, 1, 4, 2, 5]);

    let p = a.buffer().as_ptr();
    let b = a.into_shape((1, 6)).unwrap();
    assert_eq!(b.buffer().as_ptr(), p);
    assert_eq!(b.flatten().shape(), &[6]);
}

#[test]
fn test_dtype_tags() {
    assert_eq!(NDArray::<bool>::new(1).dtype(), DType::Bool);
    assert_eq!(NDArray::<i32>::new(1).dtype(), DType::Int32);
    assert_eq!(NDArray::<f64>::new(1).dtype(), DType::Float64);
    assert_eq!(DType::Float32.itemsize(), 4);
}

defmac!(c_and_f_agree shape => {
    let c = NDArray::from_shape_fn(shape, |ix| ix.iter().fold(0, |acc, &i| acc * 10 + i));
    let f = NDArray::from_shape_fn(shape.f(), |ix| ix.iter().fold(0, |acc, &i| acc * 10 + i));
    assert_eq!(c, f);
    for i in 0..c.size() as isize {
        assert_eq!(c.item(i).unwrap(), f.item(i).unwrap());
    }
});

#[test]
fn test_from_shape_fn_order() {
    c_and_f_agree!([0, 1]);
    c_and_f_agree!([2, 3]);
    c_and_f_agree!([3, 1, 4]);
    c_and_f_agree!([2, 2, 2, 2]);
}

#[test]
fn test_item_load_store() {
    // same logical values, different memory order
    let c = NDArray::from_vec((2, 3), vec![1, 2, 3, 4, 5, 6]).unwrap();
    let mut f = NDArray::from_vec((2, 3).f(), vec![1, 4, 2, 5, 3, 6]).unwrap();
    for i in 0..6 {
        assert_eq!(c.item(i).unwrap(), f.item(i).unwrap());
    }
    assert_eq!(c.item(-1).unwrap(), 6);
    assert_eq!(f.item(-6).unwrap(), 1);
    assert_eq!(c.item(6).unwrap_err().kind(), ErrorKind::IndexOutOfBounds);
    assert_eq!(c.item(-7).unwrap_err().kind(), ErrorKind::IndexOutOfBounds);

    assert_eq!(c.item_at(&[1, -1]).unwrap(), 6);
    assert_eq!(c.item_at(&[-2, 0]).unwrap(), 1);
    let e = c.item_at(&[0, 3]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::IndexOutOfBounds);
    assert!(e.message().contains("axis 1"), "{}", e);
    assert_eq!(c.item_at(&[0]).unwrap_err().kind(), ErrorKind::DimensionalityMismatch);

    // load and store address memory order
    assert_eq!(f.load(1).unwrap(), 4);
    f.store(1, 40).unwrap();
    assert_eq!(f.item_at(&[1, 0]).unwrap(), 40);
    assert_eq!(f.load(6).unwrap_err().kind(), ErrorKind::IndexOutOfBounds);
    // negative positions count from the end of memory order
    assert_eq!(f.load(-1).unwrap(), 6);
    assert_eq!(f.load(-5).unwrap(), 40);
    f.store(-2, 30).unwrap();
    assert_eq!(f.item_at(&[0, 2]).unwrap(), 30);
    assert_eq!(f.load(-7).unwrap_err().kind(), ErrorKind::IndexOutOfBounds);
    assert_eq!(f.store(-7, 0).unwrap_err().kind(), ErrorKind::IndexOutOfBounds);

    f.itemset_at(&[-1, -1], 60).unwrap();
    assert_eq!(f.item(5).unwrap(), 60);
}

#[test]
fn test_index_operator() {
    let mut a = NDArray::<i32>::zeros((2, 3));
    a[[1, 2]] = 5;
    assert_eq!(a[[1, 2]], 5);
    assert_eq!(a.get(&[1, 2]), Some(&5));
    assert_eq!(a.get(&[2, 0]), None);
}

#[test]
#[should_panic]
fn test_index_operator_out_of_bounds() {
    let a = NDArray::<i32>::zeros((2, 3));
    let _ = a[[2, 0]];
}

#[test]
fn test_row_col() {
    let a = NDArray::from([[1, 2, 3], [4, 5, 6]]);
    assert_eq!(a.row(1).unwrap().to_vec(), vec![4, 5, 6]);
    assert_eq!(a.col(2).unwrap().to_vec(), vec![3, 6]);
    let v = NDArray::from(vec![1, 2]);
    assert_eq!(v.row(0).unwrap_err().kind(), ErrorKind::UnsupportedOperation);
    assert_eq!(a.row(2).unwrap_err().kind(), ErrorKind::IndexOutOfBounds);
}

#[test]
fn test_as_contiguous() {
    let a = NDArray::from_shape_fn((2, 3), |ix| ix[0] * 3 + ix[1]);
    let f = a.as_contiguous(Order::F);
    assert!(f.is_f_contiguous());
    assert_eq!(f.as_slice_memory_order().unwrap(), &[0, 3, 1, 4, 2, 5]);
    assert_eq!(f, a);
    assert!(f.as_slice().is_none());
    let c = f.as_contiguous(Order::C);
    assert_eq!(c.as_slice().unwrap(), &[0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_debug_format() {
    let a = NDArray::from([[1, 2], [3, 4]]);
    assert!(format!("{:?}", a).starts_with("[[1, 2],\n [3, 4]] shape=[2, 2]"));
    assert!(format!("{:?}", a.t()).contains("F_CONTIGUOUS"));
    assert!(format!("{:?}", NDArray::from_scalar(5)).starts_with("5 shape=[]"));
}
