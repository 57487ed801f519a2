//! Array type: a shared-storage handle to a 4-D buffer.
//!
//! Cloning an `Array` shares the underlying storage, so a handle captured by
//! a queued task and the handle held by the caller refer to the same buffer.
//! A deferred operation's output is not guaranteed populated until `eval()`
//! (or `host()`) is called, which blocks on the work queue barrier.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::element::Element;
use crate::queue;
use crate::types::{DType, Dim4};
use crate::{Error, Result};

/// A 4-D array handle with extents `(width, height, channels, batch)`.
///
/// Storage is contiguous at allocation; strides are kept in elements so
/// kernels address planes without assuming contiguity. The single-writer
/// discipline applies: at most one queued task writes a given buffer, and
/// readers go through `eval()` first.
#[derive(Clone)]
pub struct Array<T: Element> {
    dims: Dim4,
    strides: Dim4,
    data: Arc<Mutex<Vec<T>>>,
}

impl<T: Element> Array<T> {
    /// Create an array from existing data.
    pub fn from_vec(data: Vec<T>, dims: Dim4) -> Result<Self> {
        let expected = dims.elements() as usize;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                dims,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            dims,
            strides: dims.strides(),
            data: Arc::new(Mutex::new(data)),
        })
    }

    /// Freshly allocated array filled with the element kind's zero.
    ///
    /// This is the allocation primitive dispatchers use for their outputs.
    pub fn zeros(dims: Dim4) -> Self {
        let n = dims.elements() as usize;
        Self {
            dims,
            strides: dims.strides(),
            data: Arc::new(Mutex::new(vec![T::ZERO; n])),
        }
    }

    /// Freshly allocated array filled with `value`.
    pub fn constant(value: T, dims: Dim4) -> Self {
        let n = dims.elements() as usize;
        Self {
            dims,
            strides: dims.strides(),
            data: Arc::new(Mutex::new(vec![value; n])),
        }
    }

    /// Materialize the array: blocks until every task enqueued before this
    /// call has completed, surfacing the first task error if one occurred.
    pub fn eval(&self) -> Result<()> {
        queue::queue().sync()
    }

    /// Copy the data out. Forces materialization first.
    pub fn host(&self) -> Result<Vec<T>> {
        self.eval()?;
        Ok(self.data.lock().unwrap().clone())
    }

    /// Lock the storage for the duration of a kernel invocation.
    ///
    /// Kernels take this lock once per task, never per element.
    pub fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.data.lock().unwrap()
    }

    pub fn dims(&self) -> Dim4 {
        self.dims
    }

    pub fn strides(&self) -> Dim4 {
        self.strides
    }

    /// Number of elements.
    pub fn numel(&self) -> u64 {
        self.dims.elements()
    }

    /// Runtime element-kind tag.
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }
}

impl<T: Element> std::fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Array")
            .field("dims", &self.dims)
            .field("dtype", &T::DTYPE)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec() {
        let a = Array::from_vec(vec![1.0f32, 2.0, 3.0, 4.0], Dim4::new([2, 2, 1, 1])).unwrap();
        assert_eq!(a.host().unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.numel(), 4);
        assert_eq!(a.dtype(), DType::F32);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let r = Array::from_vec(vec![1.0f32, 2.0], Dim4::new([3, 1, 1, 1]));
        assert!(matches!(r, Err(Error::SizeMismatch { expected: 3, got: 2, .. })));
    }

    #[test]
    fn test_zeros() {
        let a = Array::<u8>::zeros(Dim4::new([2, 3, 1, 1]));
        assert_eq!(a.host().unwrap(), vec![0u8; 6]);
    }

    #[test]
    fn test_constant() {
        let a = Array::constant(7i16, Dim4::new([2, 2, 1, 1]));
        assert_eq!(a.host().unwrap(), vec![7i16; 4]);
    }

    #[test]
    fn test_clone_shares_storage() {
        let a = Array::from_vec(vec![1.0f64, 2.0], Dim4::new([2, 1, 1, 1])).unwrap();
        let b = a.clone();
        b.lock()[0] = 9.0;
        assert_eq!(a.host().unwrap(), vec![9.0, 2.0]);
    }

    #[test]
    fn test_strides_follow_dims() {
        let a = Array::<f32>::zeros(Dim4::new([4, 3, 2, 1]));
        assert_eq!(a.strides(), Dim4::new([1, 4, 12, 24]));
    }
}
