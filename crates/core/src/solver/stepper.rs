//! The per-step update sweep over the active voxel list
//!
//! Reads the front buffer, writes the back buffer for every live (non-air)
//! active voxel. Per voxel the sweep:
//!
//! 1. gathers heat and moisture influx from the 26-neighborhood, weighted by
//!    convection (from below), wind alignment (same level) and distance;
//! 2. applies combustion: fuel consumption, heat release, boil-off;
//! 3. pins heat sources to full temperature and moisture sources to capacity;
//! 4. evaporates, rehumidifies toward ambient humidity, cools toward ambient
//!    temperature, and damps temperature swings in wet cells;
//! 5. clamps every channel and writes the quantized cell back.
//!
//! The front/back swap happens in the owning system's `step` after the whole
//! sweep. Authoring keeps both buffers coherent between steps, so the air
//! cells the sweep skips never resurrect stale state across a swap.

use crate::core_types::voxel::{pack_channel, unpack_channel, VoxelCell};
use crate::core_types::{MaterialId, Vec2};
use crate::grid::GridConfig;
use crate::wind::WindParams;

use super::params::SimulationParams;
use super::stats::StatsAccum;

/// Upper bound on a single frame's delta time, in seconds. Slower frames are
/// clamped so a hitch cannot inject an oversized diffusion step.
pub const MAX_STEP_SECONDS: f32 = 0.05;

/// Scale on neighbor temperature differences entering a cell.
const HEAT_EXCHANGE_RATE: f32 = 0.1;

/// Moisture gained per second from one adjacent moisture source.
const MOISTURE_SOURCE_RATE: f32 = 0.05;

/// Heat released per second by a burning cell.
const COMBUSTION_HEAT_RATE: f32 = 0.3;

/// Global scale on per-material fuel consumption.
const FUEL_CONSUMPTION_SCALE: f32 = 0.1;

/// Boil-off multiplier applied to the evaporation rate while burning.
const COMBUSTION_DRYING_SCALE: f32 = 2.0;

/// Temperature above which standing moisture starts to evaporate.
const EVAPORATION_TEMP_MIN: f32 = 0.3;

/// Fraction per second of the gap to ambient humidity regained by dry cells.
const REHUMIDIFY_RATE: f32 = 0.01;

/// Fraction per second of the gap to ambient temperature shed by idle cells.
const COOLING_RATE: f32 = 0.1;

/// Moisture above which a cell damps its own temperature swings.
const WET_DAMPING_MIN: f32 = 0.3;

/// Scale on the wet heat-sink term.
const WET_DAMPING_RATE: f32 = 0.1;

/// Steaming classification thresholds: hot and wet at the same time.
const STEAMING_TEMP_MIN: f32 = 0.5;
const STEAMING_MOISTURE_MIN: f32 = 0.4;

/// Fuel at or below which a combustible cell counts as charred.
const CHARRED_FUEL_MAX: f32 = 0.01;

/// One precomputed entry of the 3x3x3-minus-center neighborhood.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NeighborOffset {
    pub dx: i32,
    pub dy: i32,
    pub dz: i32,
    /// `1/sqrt(touched axes)`: face 1, edge 1/sqrt(2), corner 1/sqrt(3).
    pub distance_factor: f32,
    /// Unit XZ direction influx travels when it arrives from this neighbor
    /// (cell minus neighbor). Zero for the two straight vertical offsets.
    pub inflow: Vec2,
}

/// Build the 26-entry neighborhood table, ordered to match buffer layout.
pub(crate) fn neighbor_offsets() -> [NeighborOffset; 26] {
    let mut offsets = [NeighborOffset {
        dx: 0,
        dy: 0,
        dz: 0,
        distance_factor: 0.0,
        inflow: Vec2::zeros(),
    }; 26];
    let mut next = 0;
    for dy in -1..=1_i32 {
        for dz in -1..=1_i32 {
            for dx in -1..=1_i32 {
                if dx == 0 && dy == 0 && dz == 0 {
                    continue;
                }
                let axes = i32::from(dx != 0) + i32::from(dy != 0) + i32::from(dz != 0);
                let inflow = if dx == 0 && dz == 0 {
                    Vec2::zeros()
                } else {
                    -Vec2::new(dx as f32, dz as f32).normalize()
                };
                offsets[next] = NeighborOffset {
                    dx,
                    dy,
                    dz,
                    distance_factor: 1.0 / (axes as f32).sqrt(),
                    inflow,
                };
                next += 1;
            }
        }
    }
    debug_assert_eq!(next, offsets.len());
    offsets
}

/// Everything a sweep reads besides the grid buffers, captured once per step.
pub(crate) struct StepInputs<'a> {
    pub config: &'a GridConfig,
    pub neighbors: &'a [NeighborOffset; 26],
    pub wind: &'a WindParams,
    pub simulation: &'a SimulationParams,
    /// Global fuel-consumption multiplier.
    pub global_burn_rate: f32,
    /// Effective delta time: already clamped and time-scaled.
    pub dt: f32,
    /// Simulation clock at the start of the step.
    pub time: f32,
}

/// Advance every live active voxel by one step.
///
/// Reads `front`, writes `back` for each non-air entry of `active`. Stale air
/// entries are skipped; their cells are already empty in both buffers.
pub(crate) fn step_active_cells(
    inputs: &StepInputs<'_>,
    active: &[u32],
    front: &[VoxelCell],
    back: &mut [VoxelCell],
) -> StatsAccum {
    let sim = inputs.simulation;
    let mut accum = StatsAccum::default();

    for &index in active {
        let idx = index as usize;
        let cell = front[idx];
        let material = cell.material_id();
        if material == MaterialId::Air {
            continue;
        }

        let props = material.properties();
        let mut state = cell.unpack();
        let (x, y, z) = inputs.config.coords_of(idx);
        let center = inputs.config.world_center(x, y, z);
        let wind = inputs.wind.sample(center.x, center.z, inputs.time);
        let below_capacity = state.moisture < props.moisture_capacity;

        // Gather heat and moisture from the 26-neighborhood of the read buffer.
        let mut heat_influx = 0.0_f32;
        let mut moisture_influx = 0.0_f32;
        for offset in inputs.neighbors {
            let nx = x as i32 + offset.dx;
            let ny = y as i32 + offset.dy;
            let nz = z as i32 + offset.dz;
            if !inputs.config.contains(nx, ny, nz) {
                continue;
            }
            let neighbor = front[inputs.config.flat_index(nx as u32, ny as u32, nz as u32)];
            let neighbor_props = neighbor.material_id().properties();

            let mut direction_weight = 1.0_f32;
            if offset.dy < 0 {
                // Buoyancy: influx from the voxel beneath is amplified.
                direction_weight *= sim.convection_strength;
            } else if offset.dy == 0 {
                // Influx traveling with the wind is amplified, influx against
                // it suppressed; strong wind can push the weight negative.
                direction_weight *= 1.0 + 2.0 * offset.inflow.dot(&wind);
            }

            let conductivity = (props.heat_conductivity + neighbor_props.heat_conductivity) * 0.5;
            heat_influx += (unpack_channel(neighbor.temperature) - state.temperature)
                * conductivity
                * direction_weight
                * offset.distance_factor
                * HEAT_EXCHANGE_RATE;

            if below_capacity && neighbor_props.is_moisture_source {
                moisture_influx += MOISTURE_SOURCE_RATE * offset.distance_factor;
            }
        }

        state.temperature += heat_influx * inputs.dt;

        let burning = state.is_burning();
        if burning {
            state.fuel = (state.fuel
                - props.burn_rate * inputs.global_burn_rate * inputs.dt * FUEL_CONSUMPTION_SCALE)
                .max(0.0);
            state.temperature += COMBUSTION_HEAT_RATE * inputs.dt;
            state.moisture -= props.evaporation_rate * inputs.dt * COMBUSTION_DRYING_SCALE;
        }

        if props.is_heat_source {
            state.temperature = 1.0;
        }

        // Moisture dynamics: evaporation, source influx, ambient drift, pin.
        if state.temperature > EVAPORATION_TEMP_MIN {
            state.moisture -=
                props.evaporation_rate * (state.temperature - EVAPORATION_TEMP_MIN) * inputs.dt;
        }
        state.moisture += moisture_influx * inputs.dt;
        if state.moisture < sim.ambient_humidity {
            state.moisture += (sim.ambient_humidity - state.moisture) * REHUMIDIFY_RATE * inputs.dt;
        }
        if props.is_moisture_source {
            state.moisture = props.moisture_capacity;
        }

        // Idle cells relax toward ambient temperature.
        if !props.is_heat_source && !burning {
            state.temperature +=
                (sim.ambient_temperature - state.temperature) * COOLING_RATE * inputs.dt;
        }

        // Wet cells resist temperature swings in proportion to wetness.
        if state.moisture > WET_DAMPING_MIN {
            state.temperature -= state.moisture
                * WET_DAMPING_RATE
                * inputs.dt
                * (state.temperature - sim.ambient_temperature);
        }

        let temperature = state.temperature.clamp(0.0, 1.0);
        let moisture = state.moisture.clamp(0.0, props.moisture_capacity);
        let fuel = state.fuel.clamp(0.0, 1.0);
        back[idx] = VoxelCell {
            temperature: pack_channel(temperature),
            moisture: pack_channel(moisture),
            fuel: pack_channel(fuel),
            material: material.ordinal(),
        };

        accum.cells += 1;
        accum.temperature_sum += temperature;
        accum.moisture_sum += moisture;
        if burning {
            accum.burning += 1;
        }
        if temperature > STEAMING_TEMP_MIN && moisture > STEAMING_MOISTURE_MIN {
            accum.steaming += 1;
        }
        if fuel <= CHARRED_FUEL_MAX && props.max_fuel > 0.0 {
            accum.charred += 1;
        }
    }

    accum
}
