//! Procedural wind field sampling
//!
//! Wind is never stored per cell: the field is a pure function of position
//! and time, built from a mean heading plus three deterministic modulations.
//! Spatially coherent value noise bends the heading into local "channels"
//! and varies local strength, a high-frequency sine adds turbulent jitter,
//! and a global gust pulse throbs the whole field. Identical inputs always
//! produce identical vectors, which keeps stepping reproducible.

use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::core_types::noise::value_noise_2d;
use crate::core_types::Vec2;

/// Offset applied to the speed-noise sample coordinates so local speed does
/// not mirror the local heading.
const SPEED_NOISE_OFFSET: f32 = 157.31;

/// Operator-tunable wind parameters, read at the start of every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindParams {
    /// Mean heading in degrees (0 = +X, 90 = +Z).
    pub direction_deg: f32,
    /// Mean strength in [0, 1].
    pub speed: f32,
    /// High-frequency heading jitter strength in [0, 1].
    pub turbulence: f32,
    /// Gust pulse frequency in Hz. Zero disables gusting.
    pub gust_frequency: f32,
    /// Gust pulse strength on top of the base speed.
    pub gust_amplitude: f32,
    /// How strongly the field varies from place to place, in [0, 1].
    pub local_variation: f32,
    /// Spatial frequency of the local-variation noise.
    pub variation_scale: f32,
}

impl Default for WindParams {
    fn default() -> Self {
        Self {
            direction_deg: 0.0,
            speed: 0.5,
            turbulence: 0.3,
            gust_frequency: 0.2,
            gust_amplitude: 0.5,
            local_variation: 0.4,
            variation_scale: 0.05,
        }
    }
}

impl WindParams {
    /// Sample the wind vector on the world XZ plane at time `t` seconds.
    #[must_use]
    pub fn sample(&self, x: f32, z: f32, t: f32) -> Vec2 {
        let mut angle = self.direction_deg.to_radians();

        // Spatially coherent heading variation: the noise drifts slowly with
        // time so the channels wander instead of being frozen in place.
        let nx = x * self.variation_scale + t * 0.1;
        let nz = z * self.variation_scale + t * 0.05;
        angle += value_noise_2d(nx, nz) * self.local_variation * (PI / 2.0);

        // Independent noise layer modulates local strength around 1.0
        let speed_noise = value_noise_2d(nx + SPEED_NOISE_OFFSET, nz + SPEED_NOISE_OFFSET);
        let local_speed = 1.0 - self.local_variation * 0.5 + speed_noise * self.local_variation;

        // High-frequency jitter, not spatially smooth
        angle += self.turbulence * (2.3 * t + 0.1 * x + 0.1 * z).sin() * 0.5;

        let gust = if self.gust_frequency > 0.0 {
            1.0 + self.gust_amplitude * (TAU * self.gust_frequency * t).sin().max(0.0)
        } else {
            1.0
        };

        Vec2::new(angle.cos(), angle.sin()) * (self.speed * gust * local_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Steady-state params: no noise, no jitter, no gusts.
    fn steady(direction_deg: f32, speed: f32) -> WindParams {
        WindParams {
            direction_deg,
            speed,
            turbulence: 0.0,
            gust_frequency: 0.0,
            gust_amplitude: 0.0,
            local_variation: 0.0,
            variation_scale: 0.05,
        }
    }

    #[test]
    fn test_sample_deterministic() {
        let params = WindParams::default();
        let a = params.sample(12.5, -3.25, 7.8);
        let b = params.sample(12.5, -3.25, 7.8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_steady_wind_points_along_heading() {
        let east = steady(0.0, 1.0).sample(10.0, 20.0, 5.0);
        assert_relative_eq!(east.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(east.y, 0.0, epsilon = 1e-6);

        let south = steady(90.0, 0.5).sample(-4.0, 8.0, 1.0);
        assert_relative_eq!(south.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(south.y, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_speed_is_calm() {
        let params = WindParams {
            speed: 0.0,
            ..WindParams::default()
        };
        let v = params.sample(3.0, 4.0, 2.0);
        assert_eq!(v, Vec2::zeros());
    }

    #[test]
    fn test_magnitude_bounded() {
        // |wind| <= speed * (1 + gust_amplitude) * (1 + local_variation / 2)
        let params = WindParams::default();
        let bound =
            params.speed * (1.0 + params.gust_amplitude) * (1.0 + params.local_variation * 0.5);
        for i in 0..200 {
            let f = f64::from(i) as f32;
            let v = params.sample(f * 3.7, f * -2.1, f * 0.13);
            assert!(
                v.norm() <= bound + 1e-5,
                "wind magnitude {} exceeds bound {bound}",
                v.norm()
            );
        }
    }

    #[test]
    fn test_local_speed_never_reverses() {
        // The local modulation bottoms out at 1 - local_variation / 2, so a
        // fully varied field still blows forward everywhere
        let params = WindParams {
            local_variation: 1.0,
            turbulence: 0.0,
            gust_frequency: 0.0,
            ..WindParams::default()
        };
        for i in 0..200 {
            let f = f64::from(i) as f32;
            let v = params.sample(f * 11.3, f * 5.9, 0.0);
            assert!(v.norm() >= params.speed * 0.5 - 1e-5);
        }
    }

    #[test]
    fn test_gust_pulses_over_time() {
        let params = WindParams {
            local_variation: 0.0,
            turbulence: 0.0,
            gust_frequency: 0.5,
            gust_amplitude: 1.0,
            ..WindParams::default()
        };
        // Peak of sin(2*pi*0.5*t) at t = 0.5; zero crossing at t = 2.0
        let peak = params.sample(0.0, 0.0, 0.5).norm();
        let lull = params.sample(0.0, 0.0, 2.0).norm();
        assert_relative_eq!(peak, params.speed * 2.0, epsilon = 1e-5);
        assert_relative_eq!(lull, params.speed, epsilon = 1e-5);
    }
}
