//! Geometric image operations over quiver arrays.
//!
//! The rotation op follows the inverse-transform design: a 2×3 matrix maps
//! every output pixel back into input space, and a per-mode sampling kernel
//! reads the input there. Kernels are resolved once at dispatch and the
//! work itself runs deferred on the global queue, and `rotate` returns its
//! output handle immediately.

pub mod interp;
pub mod rotate;

pub use interp::Interp;
pub use rotate::{rotate, sampling_matrix};
