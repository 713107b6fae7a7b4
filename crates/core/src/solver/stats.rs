//! Per-step aggregate statistics

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Aggregates published after every completed step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Voxels that satisfied the burning predicate this step.
    pub burning_voxels: u32,
    /// Hot and wet voxels (temperature above 0.5, moisture above 0.4).
    pub steaming_voxels: u32,
    /// Voxels whose fuel is exhausted but whose material carries fuel.
    pub charred_voxels: u32,
    /// Length of the active list, stale entries included.
    pub active_voxels: u32,
    /// Mean temperature over the non-air voxels processed this step.
    pub avg_temperature: f32,
    /// Mean moisture over the non-air voxels processed this step.
    pub avg_moisture: f32,
    /// Wall-clock cost of the step in milliseconds.
    pub step_time_ms: f32,
    /// Steps per second the measured cost extrapolates to.
    pub fps: f32,
}

/// Running totals gathered while sweeping the active list.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StatsAccum {
    pub burning: u32,
    pub steaming: u32,
    pub charred: u32,
    /// Non-air voxels processed; the denominator for the averages.
    pub cells: u32,
    pub temperature_sum: f32,
    pub moisture_sum: f32,
}

impl StatsAccum {
    pub fn finalize(self, active_len: usize, elapsed: Duration) -> SimulationStats {
        let step_time_ms = elapsed.as_secs_f32() * 1000.0;
        let (avg_temperature, avg_moisture) = if self.cells > 0 {
            let denom = self.cells as f32;
            (self.temperature_sum / denom, self.moisture_sum / denom)
        } else {
            (0.0, 0.0)
        };
        SimulationStats {
            burning_voxels: self.burning,
            steaming_voxels: self.steaming,
            charred_voxels: self.charred,
            active_voxels: active_len as u32,
            avg_temperature,
            avg_moisture,
            step_time_ms,
            fps: if step_time_ms > 0.0 { 1000.0 / step_time_ms } else { 0.0 },
        }
    }
}
