//! Array handles and the asynchronous execution substrate for quiver.
//!
//! `quiver-core` provides the foundational types (`Array`, `Dim4`, `DType`,
//! the `Element` kind trait) and the global FIFO work queue that deferred
//! operations run on. An `Array` is a lightweight handle to shared storage;
//! operations that produce arrays submit their kernels to the queue and
//! return the output handle immediately. Calling `eval()` (or `host()`)
//! blocks until every previously submitted task has completed.
//!
//! Image operations built on this substrate live in `quiver-image`.

pub mod array;
pub mod element;
pub mod queue;
pub mod types;

pub use array::Array;
pub use element::Element;
pub use types::{DType, Dim4};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The requested interpolation method is not supported by the operation.
    /// Raised synchronously at dispatch, before anything is allocated or
    /// queued.
    #[error("unsupported interpolation method: {0}")]
    UnsupportedInterp(&'static str),

    #[error("data length {got} does not match shape {dims} (expected {expected})")]
    SizeMismatch {
        dims: Dim4,
        expected: usize,
        got: usize,
    },

    /// Output channel/batch extents must match the input's; sampling only
    /// remaps the two spatial axes.
    #[error("output planes {odims} do not match input planes {idims}")]
    PlaneMismatch { idims: Dim4, odims: Dim4 },

    #[error("work queue unavailable: {0}")]
    Queue(&'static str),
}
