//! Interpolation methods and their per-pixel sampling kernels.
//!
//! Every kernel shares one signature: given the inverse sampling matrix and
//! an output coordinate `(x, y)`, it maps the coordinate back into input
//! space and writes one value per channel/batch plane. Iterating the planes
//! inside the kernel amortizes the coordinate mapping across the whole
//! batch. A mapped coordinate outside the input extent (accounting for the
//! mode's sampling footprint) yields the element kind's zero, never an
//! out-of-range access.

use quiver_core::{Dim4, Element};

/// Interpolation method for sampling operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interp {
    Nearest,
    Linear,
    Bilinear,
    Cubic,
    Lower,
}

impl Interp {
    pub fn name(self) -> &'static str {
        match self {
            Interp::Nearest => "nearest",
            Interp::Linear => "linear",
            Interp::Bilinear => "bilinear",
            Interp::Cubic => "cubic",
            Interp::Lower => "lower",
        }
    }
}

impl std::fmt::Display for Interp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-pixel sampling kernel signature, shared by all methods so dispatch
/// resolves the strategy once, outside the pixel loop.
///
/// Arguments: output buffer, input buffer, 2×3 inverse matrix, input
/// extents, output strides, input strides, output x, output y.
pub(crate) type SampleFn<T> = fn(&mut [T], &[T], &[f32; 6], Dim4, Dim4, Dim4, u64, u64);

fn zero_planes<T: Element>(out: &mut [T], idims: Dim4, ostrides: Dim4, x: u64, y: u64) {
    for b in 0..idims[3] {
        for c in 0..idims[2] {
            let o = (x * ostrides[0] + y * ostrides[1] + c * ostrides[2] + b * ostrides[3]) as usize;
            out[o] = T::ZERO;
        }
    }
}

/// Nearest-neighbour sampling: rounds the inverse-mapped coordinate to the
/// closest input pixel, ties away from zero.
pub(crate) fn sample_nearest<T: Element>(
    out: &mut [T],
    inp: &[T],
    tmat: &[f32; 6],
    idims: Dim4,
    ostrides: Dim4,
    istrides: Dim4,
    x: u64,
    y: u64,
) {
    let xf = x as f32;
    let yf = y as f32;
    let xi = (xf * tmat[0] + yf * tmat[1] + tmat[2]).round();
    let yi = (xf * tmat[3] + yf * tmat[4] + tmat[5]).round();

    // NaN coordinates fail the inside test and fall through to zero fill.
    let inside =
        xi >= 0.0 && yi >= 0.0 && xi <= idims[0] as f32 - 1.0 && yi <= idims[1] as f32 - 1.0;
    if !inside {
        zero_planes(out, idims, ostrides, x, y);
        return;
    }

    let (xi, yi) = (xi as u64, yi as u64);
    for b in 0..idims[3] {
        for c in 0..idims[2] {
            let o = (x * ostrides[0] + y * ostrides[1] + c * ostrides[2] + b * ostrides[3]) as usize;
            let i =
                (xi * istrides[0] + yi * istrides[1] + c * istrides[2] + b * istrides[3]) as usize;
            out[o] = inp[i];
        }
    }
}

/// Bilinear sampling: 4-tap weighted average of the surrounding input
/// pixels. Taps that fall outside the input extent contribute the element
/// kind's zero with their weight unchanged.
pub(crate) fn sample_bilinear<T: Element>(
    out: &mut [T],
    inp: &[T],
    tmat: &[f32; 6],
    idims: Dim4,
    ostrides: Dim4,
    istrides: Dim4,
    x: u64,
    y: u64,
) {
    let xf = x as f32;
    let yf = y as f32;
    let xi = xf * tmat[0] + yf * tmat[1] + tmat[2];
    let yi = xf * tmat[3] + yf * tmat[4] + tmat[5];

    let inside = xi >= 0.0 && yi >= 0.0 && xi < idims[0] as f32 && yi < idims[1] as f32;
    if !inside {
        zero_planes(out, idims, ostrides, x, y);
        return;
    }

    let gx = xi.floor();
    let gy = yi.floor();
    let fx = xi - gx;
    let fy = yi - gy;
    let x0 = gx as u64;
    let y0 = gy as u64;
    let x1_ok = x0 + 1 < idims[0];
    let y1_ok = y0 + 1 < idims[1];

    let weights = [
        (1.0 - fx) * (1.0 - fy),
        fx * (1.0 - fy),
        (1.0 - fx) * fy,
        fx * fy,
    ];

    for b in 0..idims[3] {
        for c in 0..idims[2] {
            let base = c * istrides[2] + b * istrides[3];
            let at = |px: u64, py: u64| inp[(px * istrides[0] + py * istrides[1] + base) as usize];
            let taps = [
                at(x0, y0),
                if x1_ok { at(x0 + 1, y0) } else { T::ZERO },
                if y1_ok { at(x0, y0 + 1) } else { T::ZERO },
                if x1_ok && y1_ok {
                    at(x0 + 1, y0 + 1)
                } else {
                    T::ZERO
                },
            ];
            let o = (x * ostrides[0] + y * ostrides[1] + c * ostrides[2] + b * ostrides[3]) as usize;
            out[o] = T::weighted4(taps, weights);
        }
    }
}

/// Lower sampling: floors the inverse-mapped coordinate, no weighting.
pub(crate) fn sample_lower<T: Element>(
    out: &mut [T],
    inp: &[T],
    tmat: &[f32; 6],
    idims: Dim4,
    ostrides: Dim4,
    istrides: Dim4,
    x: u64,
    y: u64,
) {
    let xf = x as f32;
    let yf = y as f32;
    let xi = xf * tmat[0] + yf * tmat[1] + tmat[2];
    let yi = xf * tmat[3] + yf * tmat[4] + tmat[5];

    let inside = xi >= 0.0 && yi >= 0.0 && xi < idims[0] as f32 && yi < idims[1] as f32;
    if !inside {
        zero_planes(out, idims, ostrides, x, y);
        return;
    }

    let (xi, yi) = (xi.floor() as u64, yi.floor() as u64);
    for b in 0..idims[3] {
        for c in 0..idims[2] {
            let o = (x * ostrides[0] + y * ostrides[1] + c * ostrides[2] + b * ostrides[3]) as usize;
            let i =
                (xi * istrides[0] + yi * istrides[1] + c * istrides[2] + b * istrides[3]) as usize;
            out[o] = inp[i];
        }
    }
}
