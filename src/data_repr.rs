// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::ptr::NonNull;
use std::slice;
use std::sync::Arc;

/// Element storage of an array.
///
/// An owned buffer is reference counted: the array that allocated it holds
/// the `OWNDATA` flag, views hold additional references, and the memory is
/// released when the last reference goes away. Writes go through
/// [`Buffer::make_mut`], which copies the elements first if any view still
/// shares them, so views never observe a write in progress and never
/// dangle.
///
/// A foreign buffer wraps memory the crate does not own; see
/// [`NDArray::from_raw_parts`](crate::NDArray::from_raw_parts).
pub struct Buffer<A> {
    repr: Repr<A>,
}

enum Repr<A> {
    Owned(Arc<Vec<A>>),
    Foreign { ptr: NonNull<A>, len: usize },
}

impl<A> Buffer<A> {
    pub(crate) fn from_vec(v: Vec<A>) -> Self {
        Buffer {
            repr: Repr::Owned(Arc::new(v)),
        }
    }

    /// Wrap `len` elements starting at `ptr` without taking ownership.
    ///
    /// ## Safety
    ///
    /// `ptr` must be valid for reads of `len` elements for as long as this
    /// buffer, or any buffer shared from it, is alive, and the memory must
    /// not be mutated during that time.
    pub(crate) unsafe fn from_raw(ptr: NonNull<A>, len: usize) -> Self {
        Buffer {
            repr: Repr::Foreign { ptr, len },
        }
    }

    /// Number of elements in the buffer
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Owned(v) => v.len(),
            Repr::Foreign { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice(&self) -> &[A] {
        match &self.repr {
            Repr::Owned(v) => v.as_slice(),
            // Safety: guaranteed by the contract of `from_raw`
            Repr::Foreign { ptr, len } => unsafe { slice::from_raw_parts(ptr.as_ptr(), *len) },
        }
    }

    pub fn as_ptr(&self) -> *const A {
        self.as_slice().as_ptr()
    }

    /// Return another handle to the same storage.
    pub(crate) fn share(&self) -> Self {
        let repr = match &self.repr {
            Repr::Owned(v) => Repr::Owned(Arc::clone(v)),
            Repr::Foreign { ptr, len } => Repr::Foreign { ptr: *ptr, len: *len },
        };
        Buffer { repr }
    }

    /// Number of live handles to this storage (always 1 for foreign memory).
    pub fn ref_count(&self) -> usize {
        match &self.repr {
            Repr::Owned(v) => Arc::strong_count(v),
            Repr::Foreign { .. } => 1,
        }
    }

    pub fn is_foreign(&self) -> bool {
        matches!(self.repr, Repr::Foreign { .. })
    }

    /// Return true if both handles refer to the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.as_ptr() == other.as_ptr() && self.len() == other.len()
    }
}

impl<A: Clone> Buffer<A> {
    /// Mutable access to the elements, unsharing them first if needed.
    ///
    /// Returns `None` for foreign memory, which is never written.
    pub(crate) fn make_mut(&mut self) -> Option<&mut [A]> {
        match &mut self.repr {
            Repr::Owned(v) => Some(Arc::make_mut(v).as_mut_slice()),
            Repr::Foreign { .. } => None,
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Buffer<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len())
            .field("refs", &self.ref_count())
            .field("foreign", &self.is_foreign())
            .finish()
    }
}

// Foreign memory is only ever read, under the `from_raw` contract.
unsafe impl<A> Sync for Buffer<A> where A: Sync + Send {}
unsafe impl<A> Send for Buffer<A> where A: Sync + Send {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_mut_unshares() {
        let mut a = Buffer::from_vec(vec![1, 2, 3]);
        let b = a.share();
        assert_eq!(a.ref_count(), 2);
        a.make_mut().unwrap()[0] = 10;
        assert_eq!(a.as_slice(), &[10, 2, 3]);
        assert_eq!(b.as_slice(), &[1, 2, 3]);
        assert_eq!(b.ref_count(), 1);
    }

    #[test]
    fn foreign_is_read_only() {
        let data = [1.0f64, 2.0];
        let mut buf = unsafe { Buffer::from_raw(NonNull::from(&data[0]), 2) };
        assert!(buf.is_foreign());
        assert_eq!(buf.as_slice(), &data);
        assert!(buf.make_mut().is_none());
    }
}
