//! Property tests for the sampling-matrix construction.

use proptest::prelude::*;
use quiver_core::Dim4;
use quiver_image::sampling_matrix;

fn extent() -> impl Strategy<Value = Dim4> {
    (1u64..=64, 1u64..=64).prop_map(|(w, h)| Dim4::new([w, h, 1, 1]))
}

fn angle() -> impl Strategy<Value = f32> {
    -10.0f32..10.0
}

proptest! {
    /// Quantization is a projection: applying it again changes nothing.
    #[test]
    fn quantization_is_idempotent(theta in angle(), idims in extent(), odims in extent()) {
        let m = sampling_matrix(theta, idims, odims);
        for v in m {
            prop_assert_eq!((v * 1000.0).round() / 1000.0, v);
        }
    }

    /// Same inputs, bit-identical matrix.
    #[test]
    fn matrix_is_deterministic(theta in angle(), idims in extent(), odims in extent()) {
        let a = sampling_matrix(theta, idims, odims);
        let b = sampling_matrix(theta, idims, odims);
        for (x, y) in a.iter().zip(b.iter()) {
            prop_assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    /// The rotation block stays (quantized-)orthonormal for any angle.
    #[test]
    fn rotation_block_is_orthonormal(theta in angle(), idims in extent(), odims in extent()) {
        let m = sampling_matrix(theta, idims, odims);
        // m[0] and m[3] are the quantized cosine and sine; quantization
        // perturbs each entry by at most 5e-4.
        let norm = m[0] * m[0] + m[3] * m[3];
        prop_assert!((norm - 1.0).abs() < 3e-3, "norm = {norm}");
        // Off-diagonal entries are the negated pair.
        prop_assert_eq!(m[1], -m[3]);
        prop_assert_eq!(m[4], m[0]);
    }

    /// A zero angle reduces the matrix to a pure recentering translation.
    #[test]
    fn zero_angle_is_pure_translation(idims in extent(), odims in extent()) {
        let m = sampling_matrix(0.0, idims, odims);
        prop_assert_eq!(m[0], 1.0);
        prop_assert_eq!(m[1], 0.0);
        prop_assert_eq!(m[3], 0.0);
        prop_assert_eq!(m[4], 1.0);
    }

    /// Zero angle with matching extents is the identity map.
    #[test]
    fn zero_angle_equal_extents_is_identity(dims in extent()) {
        let m = sampling_matrix(0.0, dims, dims);
        prop_assert_eq!(m, [1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
    }
}
