//! Voxel grid storage: geometry, double-buffered cells, active tracking

pub mod active;
pub mod config;
pub mod state;

pub use active::ActiveSet;
pub use config::{GridConfig, GridPreset};
pub use state::GridState;
