use std::ptr;
use std::sync::RwLock;

use voxfire_core::{FireSystem, GridPreset, Vec3};

use crate::error::{DefaultVoxFireError, VoxFireErrorCode};
use crate::helpers::{run_ffi, track_error};

/// Grid preset for `vox_fire_new`: 64 x 32 x 64 voxels at 1.0 m.
pub const VOX_FIRE_PRESET_SMALL: u32 = 0;
/// Grid preset for `vox_fire_new`: 128 x 48 x 128 voxels at 0.75 m.
pub const VOX_FIRE_PRESET_MEDIUM: u32 = 1;
/// Grid preset for `vox_fire_new`: 256 x 64 x 256 voxels at 0.5 m.
pub const VOX_FIRE_PRESET_LARGE: u32 = 2;

/// The simulation context handed across the FFI boundary.
///
/// Opaque to the host. One instance owns one grid; instances are fully
/// independent and can run side by side.
///
/// # Thread Safety
/// The simulation sits behind an `RwLock`, so the instance can be shared
/// across threads in any engine host:
/// - queries (`vox_fire_get_voxel`, `vox_fire_stats`, the copy-out
///   functions) take the read lock and may run concurrently;
/// - mutations (`vox_fire_step`, the authoring brushes, parameter setters)
///   take the write lock and serialize against everything else.
///
/// The usual shape is one writer calling `vox_fire_step` once per frame and
/// render/audio threads issuing reads:
///
/// ```cpp
/// VoxFireInstance* sim = nullptr;
/// if (vox_fire_new(VOX_FIRE_PRESET_MEDIUM, 0, 0, 0, &sim) != VoxFireErrorCode::Ok) {
///     fprintf(stderr, "%s\n", vox_fire_last_error());
///     return;
/// }
/// // ... per frame: vox_fire_step(sim, dt); queries from any thread ...
/// vox_fire_destroy(sim);
/// ```
pub struct VoxFireInstance {
    pub(crate) system: RwLock<FireSystem>,
}

fn preset_from_raw(raw: u32) -> Result<GridPreset, DefaultVoxFireError> {
    match raw {
        VOX_FIRE_PRESET_SMALL => Ok(GridPreset::Small),
        VOX_FIRE_PRESET_MEDIUM => Ok(GridPreset::Medium),
        VOX_FIRE_PRESET_LARGE => Ok(GridPreset::Large),
        other => Err(DefaultVoxFireError::invalid_parameter(format!(
            "Invalid grid preset: {other}. Must be 0-2"
        ))),
    }
}

/// Create a new simulation instance and return it via out-parameter.
///
/// Parameters
/// - `preset`: one of `VOX_FIRE_PRESET_SMALL` / `MEDIUM` / `LARGE`.
/// - `origin_x`, `origin_y`, `origin_z`: world-space position of the grid's
///   minimum corner, in meters.
/// - `out_instance`: receives the created instance. Must be non-null.
///   - On success: set to a valid `VoxFireInstance` pointer
///   - On failure: set to null
///
/// Returns
/// - `VoxFireErrorCode::Ok` (0) on success
/// - `VoxFireErrorCode::NullPointer` if `out_instance` is null
/// - `VoxFireErrorCode::InvalidParameter` if `preset` is not 0-2
///
/// Call `vox_fire_last_error()` for a human-readable description on failure.
///
/// # Safety
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call
///   `vox_fire_destroy` exactly once to avoid leaking it.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_new(
    preset: u32,
    origin_x: f32,
    origin_y: f32,
    origin_z: f32,
    out_instance: *mut *mut VoxFireInstance,
) -> VoxFireErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultVoxFireError::null_pointer("out_instance"));
    }

    let code = run_ffi(|| {
        let preset = preset_from_raw(preset)?;
        let system = FireSystem::new(preset, Vec3::new(origin_x, origin_y, origin_z));
        let instance = Box::new(VoxFireInstance {
            system: RwLock::new(system),
        });
        unsafe {
            *out_instance = Box::into_raw(instance);
        }
        Ok(())
    });

    if code != VoxFireErrorCode::Ok {
        // Set to null on error (per documentation contract)
        unsafe {
            *out_instance = ptr::null_mut();
        }
    }
    code
}

/// Destroy an instance previously created by `vox_fire_new`.
///
/// Reclaims ownership of the pointer and frees the simulation and all of
/// its buffers. If `ptr` is null this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `vox_fire_new`.
/// - The pointer MUST NOT have been freed already; after this call the
///   caller must not use it again.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_destroy(ptr: *mut VoxFireInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: the pointer came from `Box::into_raw` in `vox_fire_new` and has
    // not been freed. Reclaiming the Box drops the simulation.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
