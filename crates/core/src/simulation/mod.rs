//! The public simulation facade
//!
//! [`FireSystem`] owns the double-buffered grid, the active set, and the
//! simulation clock, and exposes the step/query surface a driver consumes.
//! Scene-building operations hang off the same type from the `authoring`
//! sibling module.

mod authoring;

use std::fmt;
use std::time::Instant;

use tracing::{info, trace};

use crate::core_types::voxel::{pack_channel, VoxelCell, VOXEL_STRIDE};
use crate::core_types::{MaterialId, Vec3, VoxelState};
use crate::grid::{ActiveSet, GridConfig, GridPreset, GridState};
use crate::solver::{
    neighbor_offsets, step_active_cells, NeighborOffset, SimulationParams, SimulationStats,
    StepInputs, MAX_STEP_SECONDS,
};
use crate::wind::WindParams;

/// A self-contained voxel fire simulation.
///
/// All state lives in the instance, so simulations can run side by side
/// without interference. `wind` and `simulation` are plain public fields;
/// mutate them freely between steps, each step reads one snapshot.
pub struct FireSystem {
    config: GridConfig,
    /// Wind field parameters, read at the start of every step.
    pub wind: WindParams,
    /// Solver tunables, read at the start of every step.
    pub simulation: SimulationParams,
    state: GridState,
    active: ActiveSet,
    neighbors: [NeighborOffset; 26],
    global_burn_rate: f32,
    global_fuel: f32,
    time: f32,
    stats: SimulationStats,
}

impl FireSystem {
    /// Construct a simulation on one of the named grid presets.
    #[must_use]
    pub fn new(preset: GridPreset, origin: Vec3) -> Self {
        Self::with_config(preset.config(origin))
    }

    /// Construct a simulation over an explicit grid geometry.
    #[must_use]
    pub fn with_config(config: GridConfig) -> Self {
        let count = config.voxel_count();
        info!(
            "Creating fire system: {}x{}x{} voxels ({} cells) at {:.2}m",
            config.size_x, config.size_y, config.size_z, count, config.voxel_size
        );
        Self {
            config,
            wind: WindParams::default(),
            simulation: SimulationParams::default(),
            state: GridState::new(count),
            active: ActiveSet::new(count),
            neighbors: neighbor_offsets(),
            global_burn_rate: 1.0,
            global_fuel: 1.0,
            time: 0.0,
            stats: SimulationStats::default(),
        }
    }

    /// Advance the simulation by `dt_seconds` of frame time.
    ///
    /// The delta is clamped to [`MAX_STEP_SECONDS`] and scaled by the
    /// configured time scale, then the whole active list is swept and the
    /// buffers swap. Non-finite or non-positive deltas are ignored entirely:
    /// no sweep, no swap, no clock advance.
    pub fn step(&mut self, dt_seconds: f32) {
        if !dt_seconds.is_finite() || dt_seconds <= 0.0 {
            trace!("Ignoring degenerate step dt={dt_seconds}");
            return;
        }
        let started = Instant::now();
        let dt = dt_seconds.min(MAX_STEP_SECONDS) * self.simulation.time_scale.max(0.0);

        let inputs = StepInputs {
            config: &self.config,
            neighbors: &self.neighbors,
            wind: &self.wind,
            simulation: &self.simulation,
            global_burn_rate: self.global_burn_rate,
            dt,
            time: self.time,
        };
        let (front, back) = self.state.split();
        let accum = step_active_cells(&inputs, self.active.indices(), front, back);
        self.state.swap();
        self.time += dt;
        self.stats = accum.finalize(self.active.len(), started.elapsed());
    }

    /// Decoded state of the voxel at signed grid coordinates, or `None` when
    /// the coordinates fall outside the grid.
    #[must_use]
    pub fn voxel(&self, x: i32, y: i32, z: i32) -> Option<VoxelState> {
        if !self.config.contains(x, y, z) {
            return None;
        }
        let index = self.config.flat_index(x as u32, y as u32, z as u32);
        Some(self.state.get(index).unpack())
    }

    /// Flat indices of every tracked voxel, for sparse consumers.
    ///
    /// May contain stale entries for voxels authored back to air; call
    /// [`FireSystem::rebuild_active_list`] after bulk edits to resynchronize.
    #[must_use]
    pub fn active_voxels(&self) -> &[u32] {
        self.active.indices()
    }

    /// The packed front buffer as raw bytes, four per voxel.
    #[must_use]
    pub fn state_bytes(&self) -> &[u8] {
        self.state.as_bytes()
    }

    /// Replace the grid contents with a previously captured byte buffer.
    ///
    /// The buffer must be exactly `voxel_count * 4` bytes. Cells are
    /// sanitized on the way in: unknown material ordinals degrade to air, air
    /// cells are zeroed, moisture is capped to the material's capacity. The
    /// active list is rebuilt from the loaded contents.
    ///
    /// # Errors
    ///
    /// Returns [`StateBufferError`] when the buffer length does not match.
    pub fn load_state_bytes(&mut self, bytes: &[u8]) -> Result<(), StateBufferError> {
        let expected = self.config.voxel_count() * VOXEL_STRIDE;
        if bytes.len() != expected {
            return Err(StateBufferError {
                expected,
                actual: bytes.len(),
            });
        }
        let cells: Vec<VoxelCell> = bytemuck::cast_slice::<u8, VoxelCell>(bytes)
            .iter()
            .map(|cell| Self::sanitize_cell(*cell))
            .collect();
        self.state.load_cells(&cells);
        self.rebuild_active_list();
        Ok(())
    }

    fn sanitize_cell(cell: VoxelCell) -> VoxelCell {
        let material = cell.material_id();
        if material == MaterialId::Air {
            return VoxelCell::EMPTY;
        }
        let capacity = pack_channel(material.properties().moisture_capacity);
        VoxelCell {
            temperature: cell.temperature,
            moisture: cell.moisture.min(capacity),
            fuel: cell.fuel,
            material: material.ordinal(),
        }
    }

    /// Aggregates from the most recent completed step.
    #[must_use]
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// The immutable grid geometry.
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Simulation clock in seconds: the sum of all effective step deltas.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Set the global burn-rate and fuel multipliers.
    ///
    /// The burn-rate multiplier scales fuel consumption of every burning
    /// cell; the fuel multiplier scales the fuel assigned by authoring.
    /// Negative or NaN inputs are floored to zero.
    pub fn set_global_multipliers(&mut self, burn_rate: f32, fuel: f32) {
        self.global_burn_rate = burn_rate.max(0.0);
        self.global_fuel = fuel.max(0.0);
    }

    /// Current `(burn_rate, fuel)` global multipliers.
    #[must_use]
    pub fn global_multipliers(&self) -> (f32, f32) {
        (self.global_burn_rate, self.global_fuel)
    }
}

/// A state buffer did not match the grid's expected size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateBufferError {
    /// Required length in bytes.
    pub expected: usize,
    /// Provided length in bytes.
    pub actual: usize,
}

impl fmt::Display for StateBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "state buffer is {} bytes, expected {}",
            self.actual, self.expected
        )
    }
}

impl std::error::Error for StateBufferError {}
