//! Deterministic value noise for wind field variation
//!
//! Hash-based lattice noise: no permutation tables, no global RNG state,
//! bit-identical results for identical inputs. The wind sampler depends on
//! this determinism to keep whole-simulation runs reproducible.

/// Seed values for deterministic noise generation
/// Using prime numbers for better distribution
const SEED_X: u32 = 1619;
const SEED_Z: u32 = 6971;

/// Maximum value for positive i32 as f64 for safe conversion
const MAX_I32_POSITIVE: f64 = 0x7fff_ffff as f64;

/// Simple hash function for deterministic pseudo-random values
///
/// Based on integer hashing techniques for fast, deterministic noise.
/// Returns a value in [0, 1].
#[inline]
fn hash_2d(x: i32, z: i32) -> f32 {
    let mut n = (x.wrapping_mul(SEED_X as i32)).wrapping_add(z.wrapping_mul(SEED_Z as i32));
    n = (n << 13) ^ n;
    n = n
        .wrapping_mul(n.wrapping_mul(n).wrapping_mul(15731).wrapping_add(789221))
        .wrapping_add(1376312589);
    // Convert to [0, 1] using f64 to avoid precision loss
    (f64::from(n & 0x7fff_ffff) / MAX_I32_POSITIVE) as f32
}

/// Smooth interpolation function (Hermite curve)
#[inline]
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// 2D value noise in [0, 1] with smooth spatial continuity.
///
/// Hashes the four surrounding integer lattice points and interpolates
/// bilinearly with a Hermite fade. Callers apply their own frequency scaling
/// to the inputs; sampling at a constant offset yields an independent layer.
pub fn value_noise_2d(x: f32, z: f32) -> f32 {
    let x0 = x.floor() as i32;
    let z0 = z.floor() as i32;
    let x1 = x0.wrapping_add(1);
    let z1 = z0.wrapping_add(1);

    // Use subtraction of floats to avoid precision loss warnings
    let fx = smoothstep(x - x.floor());
    let fz = smoothstep(z - z.floor());

    // Get corner values
    let v00 = hash_2d(x0, z0);
    let v10 = hash_2d(x1, z0);
    let v01 = hash_2d(x0, z1);
    let v11 = hash_2d(x1, z1);

    // Bilinear interpolation
    let v0 = v00 + fx * (v10 - v00);
    let v1 = v01 + fx * (v11 - v01);
    v0 + fz * (v1 - v0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_range() {
        for i in 0..200 {
            let x = f64::from(i) as f32 * 7.3 - 500.0;
            let z = f64::from(i) as f32 * 11.1 - 300.0;
            let v = value_noise_2d(x, z);
            assert!((0.0..=1.0).contains(&v), "Noise out of range: {v}");
        }
    }

    #[test]
    fn test_noise_deterministic() {
        let v1 = value_noise_2d(10.4, 20.7);
        let v2 = value_noise_2d(10.4, 20.7);
        assert!((v1 - v2).abs() < 1e-9, "Noise not deterministic");
    }

    #[test]
    fn test_noise_varies_spatially() {
        // Different positions should (usually) give different values
        let v1 = value_noise_2d(0.5, 0.5);
        let v2 = value_noise_2d(50.5, 50.5);
        // These values are deterministic and should differ at these positions
        // Both should be in valid range
        assert!((0.0..=1.0).contains(&v1), "v1 out of range");
        assert!((0.0..=1.0).contains(&v2), "v2 out of range");
        assert!((v1 - v2).abs() > 1e-6, "Noise constant across space");
    }

    #[test]
    fn test_noise_smooth_over_small_steps() {
        // Neighboring samples within one lattice cell stay close
        let base = value_noise_2d(5.25, 9.75);
        let near = value_noise_2d(5.26, 9.75);
        assert!(
            (base - near).abs() < 0.1,
            "Noise discontinuity: {base} vs {near}"
        );
    }
}
