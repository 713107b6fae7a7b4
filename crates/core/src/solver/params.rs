//! Tunable simulation parameters

use serde::{Deserialize, Serialize};

/// Operator-tunable knobs, read at the start of every step.
///
/// Freely mutable between steps; a step sees one consistent snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Multiplier applied to the (already clamped) frame delta time.
    /// Negative values are treated as zero.
    pub time_scale: f32,
    /// Temperature idle cells relax toward.
    pub ambient_temperature: f32,
    /// Humidity floor that dry cells slowly drift back up to.
    pub ambient_humidity: f32,
    /// Amplification of heat received from the voxel directly below;
    /// models buoyant convection.
    pub convection_strength: f32,
    /// Reach of radiant ignition in voxels. Reserved; the solver does not
    /// read it yet.
    pub radiant_heat_range: f32,
    /// Ember transport toggle. Accepted and preserved for forward
    /// compatibility; the solver does not spawn embers.
    pub embers_enabled: bool,
    /// Embers per burning voxel per second when enabled.
    pub ember_spawn_rate: f32,
    /// Maximum ember travel distance in voxels.
    pub ember_max_distance: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            ambient_temperature: 0.05,
            ambient_humidity: 0.2,
            convection_strength: 3.0,
            radiant_heat_range: 4.0,
            embers_enabled: false,
            ember_spawn_rate: 0.5,
            ember_max_distance: 10.0,
        }
    }
}
