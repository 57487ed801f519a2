//! The closed set of element kinds and their per-kind arithmetic rules.

use num_complex::{Complex32, Complex64};

use crate::types::DType;

/// A numeric element kind an [`crate::Array`] can hold.
///
/// Each kind carries its zero value (used as the out-of-bounds background
/// when sampling), its runtime tag, and the arithmetic rule interpolation
/// uses when blending samples. The trait is implemented for exactly the
/// twelve kinds named by [`DType`]; kernels are monomorphized per kind, so
/// there is no dynamic dispatch on the per-pixel path.
pub trait Element: Copy + Send + Sync + 'static {
    const ZERO: Self;
    const DTYPE: DType;

    /// Weighted 4-tap combination used by bilinear sampling.
    ///
    /// Floating kinds accumulate in their own precision. Integer kinds
    /// accumulate in f64 and truncate toward zero on conversion.
    fn weighted4(taps: [Self; 4], weights: [f32; 4]) -> Self;
}

impl Element for f32 {
    const ZERO: Self = 0.0;
    const DTYPE: DType = DType::F32;

    fn weighted4(t: [Self; 4], w: [f32; 4]) -> Self {
        t[0] * w[0] + t[1] * w[1] + t[2] * w[2] + t[3] * w[3]
    }
}

impl Element for f64 {
    const ZERO: Self = 0.0;
    const DTYPE: DType = DType::F64;

    fn weighted4(t: [Self; 4], w: [f32; 4]) -> Self {
        t[0] * w[0] as f64 + t[1] * w[1] as f64 + t[2] * w[2] as f64 + t[3] * w[3] as f64
    }
}

impl Element for Complex32 {
    const ZERO: Self = Complex32 { re: 0.0, im: 0.0 };
    const DTYPE: DType = DType::C32;

    fn weighted4(t: [Self; 4], w: [f32; 4]) -> Self {
        t[0].scale(w[0]) + t[1].scale(w[1]) + t[2].scale(w[2]) + t[3].scale(w[3])
    }
}

impl Element for Complex64 {
    const ZERO: Self = Complex64 { re: 0.0, im: 0.0 };
    const DTYPE: DType = DType::C64;

    fn weighted4(t: [Self; 4], w: [f32; 4]) -> Self {
        t[0].scale(w[0] as f64)
            + t[1].scale(w[1] as f64)
            + t[2].scale(w[2] as f64)
            + t[3].scale(w[3] as f64)
    }
}

macro_rules! impl_int_element {
    ($($ty:ty => $tag:expr),* $(,)?) => {$(
        impl Element for $ty {
            const ZERO: Self = 0;
            const DTYPE: DType = $tag;

            fn weighted4(t: [Self; 4], w: [f32; 4]) -> Self {
                let acc = t[0] as f64 * w[0] as f64
                    + t[1] as f64 * w[1] as f64
                    + t[2] as f64 * w[2] as f64
                    + t[3] as f64 * w[3] as f64;
                acc as $ty
            }
        }
    )*};
}

impl_int_element!(
    i32 => DType::S32,
    u32 => DType::U32,
    i64 => DType::S64,
    u64 => DType::U64,
    u8  => DType::U8,
    i8  => DType::S8,
    i16 => DType::S16,
    u16 => DType::U16,
);
