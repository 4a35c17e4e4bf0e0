use itertools::{assert_equal, cloned, enumerate};

use ndstrided::prelude::*;
use ndstrided::ErrorKind;
use ndstrided_gen::array_builder::ArrayBuilder;

#[test]
fn iter_logical_order() {
    let a = NDArray::from_shape_fn((2, 3), |ix| ix[0] * 3 + ix[1]);
    assert_equal(cloned(&a), 0..6);
    assert_equal(a.t().iter().cloned(), vec![0, 3, 1, 4, 2, 5]);
    let f = a.as_contiguous(Order::F);
    assert_equal(cloned(&f), 0..6);
    assert_eq!(f.iter().len(), 6);

    let v = a.slice_view(&s![.., 0..3;2]).unwrap();
    assert_equal(cloned(&v), vec![0, 2, 3, 5]);
}

#[test]
fn iter_size_hint() {
    let a = NDArray::from_shape_fn((2, 3, 4), |ix| ix[2]);
    let t = a.t();
    let mut it = t.iter();
    assert_eq!(it.size_hint(), (24, Some(24)));
    it.next();
    assert_eq!(it.len(), 23);
    let e = NDArray::<u8>::zeros((3, 0, 2));
    assert_eq!(e.iter().count(), 0);
    let z = NDArray::from_scalar(1.5);
    assert_equal(cloned(&z), vec![1.5]);
}

#[test]
fn nditer_orders() {
    let a = NDArray::from_shape_fn((2, 3), |ix| ix[0] * 3 + ix[1]);
    assert_equal(a.nditer(Order::C).cloned(), 0..6);
    assert_equal(a.nditer(Order::F).cloned(), vec![0, 3, 1, 4, 2, 5]);

    // F traversal of an F-contiguous array is memory order
    let f = a.as_contiguous(Order::F);
    assert_equal(f.nditer(Order::F), f.as_slice_memory_order().unwrap());
    assert_eq!(f.nditer(Order::C).len(), 6);
}

#[test]
fn indexed_iter() {
    let a = NDArray::from_shape_fn((2, 2, 2), |ix| ix[0] * 4 + ix[1] * 2 + ix[2]);
    for (i, (index, &elt)) in enumerate(a.t().indexed_iter()) {
        assert_eq!(a.t().item_at(&index.iter().map(|&x| x as isize).collect::<Vec<_>>()).unwrap(), elt);
        if i == 1 {
            assert_eq!(index, vec![0, 0, 1]);
            assert_eq!(elt, 4);
        }
    }
    assert_eq!(a.indexed_iter().count(), 8);
}

#[test]
fn lanes() {
    let a = NDArray::from_shape_fn((2, 3), |ix| ix[0] * 3 + ix[1]);
    let rows: Vec<Vec<usize>> = a.iter_along_axis(Axis(1)).unwrap().map(|l| l.to_vec()).collect();
    assert_eq!(rows, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    let cols: Vec<Vec<usize>> = a.iter_along_axis(Axis(0)).unwrap().map(|l| l.to_vec()).collect();
    assert_eq!(cols, vec![vec![0, 3], vec![1, 4], vec![2, 5]]);
    assert_eq!(a.iter_along_axis(Axis(0)).unwrap().len(), 3);
    assert_eq!(a.iter_along_axis(Axis(2)).err().map(|e| e.kind()), Some(ErrorKind::IndexOutOfBounds));

    let b = NDArray::from_shape_fn((2, 2, 3), |ix| ix[0] * 6 + ix[1] * 3 + ix[2]);
    let sums: Vec<usize> = b.iter_along_axis(Axis(1)).unwrap().map(|l| l.sum()).collect();
    assert_eq!(sums, vec![3, 5, 7, 15, 17, 19]);
}

#[test]
fn lanes_of_f_array() {
    let a = NDArray::from_shape_fn((3, 2).f(), |ix| ix[0] * 2 + ix[1]);
    let rows: Vec<NDArray<usize>> = a.iter_along_axis(Axis(1)).unwrap().collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].to_vec(), vec![4, 5]);
    assert!(rows.iter().all(|r| r.owns_data()));
}

#[test]
fn over_dimension() {
    let a = NDArray::from_shape_fn((2, 3, 2), |ix| ix[0] * 100 + ix[1] * 10 + ix[2]);
    let subs: Vec<_> = a.iter_over_dimension(Axis(1)).unwrap().collect();
    assert_eq!(subs.len(), 3);
    for (j, sub) in subs.iter().enumerate() {
        assert_eq!(sub.shape(), &[2, 2]);
        assert_eq!(sub, &a.index_axis(Axis(1), j).unwrap());
    }
    assert_equal(cloned(&subs[2]), vec![20, 21, 120, 121]);
    let it = a.iter_over_dimension(Axis(0)).unwrap();
    assert_eq!(it.len(), 2);
    assert!(a.iter_over_dimension(Axis(3)).is_err());

    let v = NDArray::from(vec![7, 8]);
    let scalars: Vec<i32> = v
        .iter_over_dimension(Axis(0))
        .unwrap()
        .map(|s| s.to_scalar().unwrap())
        .collect();
    assert_eq!(scalars, vec![7, 8]);
}

#[test]
fn fold_map_zip() {
    let a = NDArray::from_shape_fn((3, 3), |ix| (ix[0] * 3 + ix[1]) as i64);
    assert_eq!(a.fold(0, |acc, &x| acc + x), 36);
    let sq = a.map(|&x| x * x);
    assert_eq!(sq.item(-1).unwrap(), 64);
    let z = a.zip_with(&a.t(), |&x, &y| x - y).unwrap();
    assert_eq!(z.t(), -&z);
    assert!(a.zip_with(&NDArray::<i64>::zeros(9), |&x, &y| x + y).is_err());
    let collected: NDArray<i64> = a.iter().filter(|&&x| x % 2 == 0).cloned().collect();
    assert_equal(cloned(&collected), vec![0, 2, 4, 6, 8]);
}

#[test]
fn traversal_ignores_memory_order() {
    for shape in [vec![4, 5], vec![2, 3, 4], vec![1, 6, 1]] {
        let c = ArrayBuilder::new(shape.clone()).memory_order(Order::C).build::<i64>();
        let f = ArrayBuilder::new(shape).memory_order(Order::F).build::<i64>();
        assert!(f.is_f_contiguous());
        assert_equal(c.iter(), f.iter());
        assert_equal(c.nditer(Order::F), f.nditer(Order::F));
        assert_equal(cloned(&f), 0..f.size() as i64);
        assert_equal(
            f.indexed_iter().map(|(ix, _)| ix),
            c.indexed_iter().map(|(ix, _)| ix),
        );
    }
}
