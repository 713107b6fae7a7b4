//! The per-step solver: tunable parameters, statistics, and the sweep kernel

mod params;
mod stats;
mod stepper;

// Re-exports
pub use params::SimulationParams;
pub use stats::SimulationStats;
pub use stepper::MAX_STEP_SECONDS;

pub(crate) use stepper::{neighbor_offsets, step_active_cells, NeighborOffset, StepInputs};
