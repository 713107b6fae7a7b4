//! C ABI for the voxel fire simulation.
//!
//! Everything a host engine needs to drive `voxfire-core` from C, C++ or C#:
//! opaque instance lifecycle, stepping, authoring brushes, parameter setters,
//! voxel and statistics queries, and copy-out transfer of the packed state
//! and active-list buffers. Every fallible function returns a
//! [`VoxFireErrorCode`] (0 is success) and records a thread-local message
//! retrievable through [`vox_fire_last_error`].
//!
//! The build script generates the matching C header at the workspace root
//! as `VoxFireFFI.h`.

pub mod error;
mod helpers;
pub mod instance;
pub mod queries;
pub mod simulation;

pub use error::{vox_fire_last_error, vox_fire_last_error_code, VoxFireErrorCode};
pub use instance::{
    vox_fire_destroy, vox_fire_new, VoxFireInstance, VOX_FIRE_PRESET_LARGE,
    VOX_FIRE_PRESET_MEDIUM, VOX_FIRE_PRESET_SMALL,
};
pub use queries::{
    vox_fire_active_len, vox_fire_copy_active, vox_fire_copy_state, vox_fire_get_voxel,
    vox_fire_grid_dimensions, vox_fire_load_state, vox_fire_state_len, vox_fire_stats,
    vox_fire_time, VoxFireStats, VoxFireVoxel,
};
pub use simulation::{
    vox_fire_clear, vox_fire_fill_region, vox_fire_fill_sphere, vox_fire_ignite,
    vox_fire_rebuild_active_list, vox_fire_scatter, vox_fire_set_global_multipliers,
    vox_fire_set_material, vox_fire_set_simulation, vox_fire_set_wind, vox_fire_step,
    vox_fire_wet, VOX_FIRE_MATERIAL_AIR, VOX_FIRE_MATERIAL_DRY_BRUSH, VOX_FIRE_MATERIAL_GRASS,
    VOX_FIRE_MATERIAL_LAVA, VOX_FIRE_MATERIAL_LEAVES, VOX_FIRE_MATERIAL_STONE,
    VOX_FIRE_MATERIAL_WATER, VOX_FIRE_MATERIAL_WOOD,
};
