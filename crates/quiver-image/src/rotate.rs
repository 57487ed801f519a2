//! Rotation about the image center via inverse affine sampling.
//!
//! `rotate` resolves the sampling kernel for the requested method, allocates
//! the output, and submits the rotation task to the global queue; the
//! output handle is returned before any pixel is written. The queued task
//! builds the sampling matrix once and walks the output extent row by row.

use quiver_core::{queue, Array, Dim4, Element, Error, Result};
use tracing::debug;

use crate::interp::{self, Interp, SampleFn};

/// Build the 2×3 inverse (output → input) sampling matrix for a rotation of
/// `theta` radians, pivoting about each extent's own center.
///
/// Every entry is quantized to 3 decimal places (`round(x * 1000) / 1000`,
/// ties away from zero). The quantization is a reproducibility contract with
/// legacy numeric output and must be preserved exactly. Pure arithmetic:
/// NaN/Inf angles propagate into the matrix rather than being rejected.
pub fn sampling_matrix(theta: f32, idims: Dim4, odims: Dim4) -> [f32; 6] {
    let c = (-theta).cos();
    let s = (-theta).sin();

    let nx = 0.5 * (idims[0] as f32 - 1.0);
    let ny = 0.5 * (idims[1] as f32 - 1.0);
    let mx = 0.5 * (odims[0] as f32 - 1.0);
    let my = 0.5 * (odims[1] as f32 - 1.0);

    // Rotate the output center, then translate it onto the input center.
    let sx = mx * c + my * -s;
    let sy = mx * s + my * c;
    let tx = nx - sx;
    let ty = ny - sy;

    [
        quantize(c),
        quantize(-s),
        quantize(tx),
        quantize(s),
        quantize(c),
        quantize(ty),
    ]
}

fn quantize(v: f32) -> f32 {
    (v * 1000.0).round() / 1000.0
}

fn run_rotation<T: Element>(
    output: Array<T>,
    input: Array<T>,
    theta: f32,
    sample: SampleFn<T>,
) -> Result<()> {
    let odims = output.dims();
    let idims = input.dims();
    let ostrides = output.strides();
    let istrides = input.strides();
    let tmat = sampling_matrix(theta, idims, odims);

    let inp_guard = input.lock();
    let mut out_guard = output.lock();
    let inp: &[T] = &inp_guard;
    let out: &mut [T] = &mut out_guard;

    // The kernel iterates the channel/batch planes internally, so one call
    // per spatial coordinate covers the whole batch.
    for y in 0..odims[1] {
        for x in 0..odims[0] {
            sample(out, inp, &tmat, idims, ostrides, istrides, x, y);
        }
    }
    Ok(())
}

/// Rotate `input` by `theta` radians about the image center into a freshly
/// allocated array of extent `odims`.
///
/// Exactly [`Interp::Nearest`], [`Interp::Bilinear`] and [`Interp::Lower`]
/// are supported, and `odims` must carry the same channel and batch counts
/// as the input (only the spatial extents may differ); violations fail
/// here, before anything is allocated or queued. The kernel runs deferred
/// on the global work queue and the
/// output handle is returned immediately; call [`Array::eval`] or
/// [`Array::host`] to block until the data is populated. Input storage is
/// only read; any pending writer of the input was enqueued earlier and FIFO
/// ordering guarantees it completes first.
pub fn rotate<T: Element>(
    input: &Array<T>,
    theta: f32,
    odims: Dim4,
    method: Interp,
) -> Result<Array<T>> {
    let sample: SampleFn<T> = match method {
        Interp::Nearest => interp::sample_nearest::<T>,
        Interp::Bilinear => interp::sample_bilinear::<T>,
        Interp::Lower => interp::sample_lower::<T>,
        other => return Err(Error::UnsupportedInterp(other.name())),
    };

    let idims = input.dims();
    if odims[2] != idims[2] || odims[3] != idims[3] {
        return Err(Error::PlaneMismatch { idims, odims });
    }

    let output = Array::<T>::zeros(odims);

    let out = output.clone();
    let inp = input.clone();
    debug!(dtype = %input.dtype(), theta, method = method.name(), "rotation queued");
    queue::queue().enqueue(Box::new(move || run_rotation(out, inp, theta, sample)))?;

    Ok(output)
}
