//! Voxel Fire Propagation Core Library
//!
//! A dual-axis (temperature/moisture) fire simulation over a dense voxel grid.
//! Each cell carries temperature, moisture, fuel, and a material id; every step
//! runs a wind-biased 26-neighbor heat/moisture exchange followed by
//! combustion, source pinning, evaporation, and cooling, writing into a back
//! buffer that is swapped in at the end of the sweep.
//!
//! ## Layout
//!
//! - [`core_types`]: material table, packed voxel record, value noise, vector aliases
//! - [`grid`]: grid geometry, double-buffered cell storage, sparse active tracking
//! - [`wind`]: procedural wind field sampling
//! - [`solver`]: the per-step sweep, its parameters and statistics
//! - [`simulation`]: the [`FireSystem`] facade and scene authoring operations

pub mod core_types;
pub mod grid;
pub mod simulation;
pub mod solver;
pub mod wind;

// Re-export the public surface
pub use core_types::{MaterialId, MaterialProperties, Vec2, Vec3, VoxelState, MATERIAL_COUNT};
pub use grid::{GridConfig, GridPreset};
pub use simulation::{FireSystem, StateBufferError};
pub use solver::{SimulationParams, SimulationStats, MAX_STEP_SECONDS};
pub use wind::WindParams;
