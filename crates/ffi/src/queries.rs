//! Read-side surface: voxel lookups, statistics and copy-out buffers.
//!
//! All buffer transfer is copy-out into caller-provided memory with the
//! length validated up front, so no allocation crosses the FFI boundary in
//! either direction.

use std::ptr;
use std::slice;

use voxfire_core::{SimulationStats, VoxelState};

use crate::error::{DefaultVoxFireError, VoxFireErrorCode};
use crate::helpers::{instance_from_ptr, run_ffi, with_system_read, with_system_write};
use crate::instance::VoxFireInstance;

/// FFI-friendly snapshot of one voxel's decoded state.
/// Keep this layout stable for C/C++/C# consumers.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct VoxFireVoxel {
    /// Normalized temperature (0.0 - 1.0).
    pub temperature: f32,

    /// Normalized moisture (0.0 - material capacity).
    pub moisture: f32,

    /// Normalized fuel remaining (0.0 - 1.0).
    pub fuel: f32,

    /// Material ordinal (see the `VOX_FIRE_MATERIAL_*` constants).
    pub material: u8,

    /// Whether this voxel currently satisfies the burning predicate.
    pub is_burning: bool,
}

impl From<VoxelState> for VoxFireVoxel {
    fn from(state: VoxelState) -> Self {
        Self {
            temperature: state.temperature,
            moisture: state.moisture,
            fuel: state.fuel,
            material: state.material.ordinal(),
            is_burning: state.is_burning(),
        }
    }
}

/// FFI-friendly copy of the per-step aggregate statistics.
/// Keep this layout stable for C/C++/C# consumers.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct VoxFireStats {
    /// Voxels that satisfied the burning predicate last step.
    pub burning_voxels: u32,
    /// Hot and wet voxels last step.
    pub steaming_voxels: u32,
    /// Voxels whose fuel is exhausted but whose material carries fuel.
    pub charred_voxels: u32,
    /// Length of the active list, stale entries included.
    pub active_voxels: u32,
    /// Mean temperature over the non-air voxels processed last step.
    pub avg_temperature: f32,
    /// Mean moisture over the non-air voxels processed last step.
    pub avg_moisture: f32,
    /// Wall-clock cost of the last step in milliseconds.
    pub step_time_ms: f32,
    /// Steps per second the measured cost extrapolates to.
    pub fps: f32,
}

impl From<SimulationStats> for VoxFireStats {
    fn from(stats: SimulationStats) -> Self {
        Self {
            burning_voxels: stats.burning_voxels,
            steaming_voxels: stats.steaming_voxels,
            charred_voxels: stats.charred_voxels,
            active_voxels: stats.active_voxels,
            avg_temperature: stats.avg_temperature,
            avg_moisture: stats.avg_moisture,
            step_time_ms: stats.step_time_ms,
            fps: stats.fps,
        }
    }
}

/// Fetch the decoded state of one voxel.
///
/// Returns
/// - `VoxFireErrorCode::Ok` (0) on success with `out_voxel` populated
/// - `VoxFireErrorCode::OutOfBounds` if the coordinates fall outside the grid
/// - `VoxFireErrorCode::NullPointer` if `ptr` or `out_voxel` is null
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
/// - `out_voxel` must be a valid, non-null pointer this function can write to.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_get_voxel(
    ptr: *const VoxFireInstance,
    x: i32,
    y: i32,
    z: i32,
    out_voxel: *mut VoxFireVoxel,
) -> VoxFireErrorCode {
    run_ffi(|| {
        if out_voxel.is_null() {
            return Err(DefaultVoxFireError::null_pointer("out_voxel"));
        }
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_read(instance, |system| {
            let state = system
                .voxel(x, y, z)
                .ok_or_else(|| DefaultVoxFireError::out_of_bounds(x, y, z))?;
            unsafe {
                *out_voxel = VoxFireVoxel::from(state);
            }
            Ok(())
        })?
    })
}

/// Fetch the aggregates from the most recent completed step.
///
/// Before the first step all counters are zero.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
/// - `out_stats` must be a valid, non-null pointer this function can write to.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_stats(
    ptr: *const VoxFireInstance,
    out_stats: *mut VoxFireStats,
) -> VoxFireErrorCode {
    run_ffi(|| {
        if out_stats.is_null() {
            return Err(DefaultVoxFireError::null_pointer("out_stats"));
        }
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_read(instance, |system| {
            unsafe {
                *out_stats = VoxFireStats::from(*system.stats());
            }
        })
    })
}

/// Length in bytes of the packed state buffer (4 bytes per voxel).
///
/// Constant for the lifetime of an instance; the usual pattern is to call
/// this once, allocate, and reuse the buffer for every `vox_fire_copy_state`.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
/// - `out_len` must be a valid, non-null pointer this function can write to.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_state_len(
    ptr: *const VoxFireInstance,
    out_len: *mut usize,
) -> VoxFireErrorCode {
    run_ffi(|| {
        if out_len.is_null() {
            return Err(DefaultVoxFireError::null_pointer("out_len"));
        }
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_read(instance, |system| {
            unsafe {
                *out_len = system.state_bytes().len();
            }
        })
    })
}

/// Copy the packed state buffer into caller memory.
///
/// `len` must be exactly the value reported by `vox_fire_state_len`; on a
/// mismatch nothing is written and `BufferSizeMismatch` is returned. The
/// copied bytes are a complete snapshot suitable for `vox_fire_load_state`
/// or for GPU upload.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
/// - `out_bytes` must be a valid, non-null pointer to `len` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_copy_state(
    ptr: *const VoxFireInstance,
    out_bytes: *mut u8,
    len: usize,
) -> VoxFireErrorCode {
    run_ffi(|| {
        if out_bytes.is_null() {
            return Err(DefaultVoxFireError::null_pointer("out_bytes"));
        }
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_read(instance, |system| {
            let state = system.state_bytes();
            if state.len() != len {
                return Err(DefaultVoxFireError::buffer_size_mismatch(state.len(), len));
            }
            // SAFETY: the caller guarantees `out_bytes` spans `len` writable
            // bytes, and `len` equals the source length.
            unsafe {
                ptr::copy_nonoverlapping(state.as_ptr(), out_bytes, state.len());
            }
            Ok(())
        })?
    })
}

/// Replace the grid contents with a snapshot captured by `vox_fire_copy_state`.
///
/// The buffer is sanitized on the way in (unknown materials degrade to air,
/// moisture is capped to capacity) and the active list is rebuilt, so the
/// instance is immediately steppable.
///
/// Returns
/// - `VoxFireErrorCode::Ok` (0) on success
/// - `VoxFireErrorCode::BufferSizeMismatch` if `len` is not the packed size
/// - `VoxFireErrorCode::NullPointer` if `ptr` or `bytes` is null
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
/// - `bytes` must be a valid, non-null pointer to `len` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_load_state(
    ptr: *const VoxFireInstance,
    bytes: *const u8,
    len: usize,
) -> VoxFireErrorCode {
    run_ffi(|| {
        if bytes.is_null() {
            return Err(DefaultVoxFireError::null_pointer("bytes"));
        }
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_write(instance, |system| {
            // SAFETY: the caller guarantees `bytes` spans `len` readable bytes.
            let snapshot = unsafe { slice::from_raw_parts(bytes, len) };
            system
                .load_state_bytes(snapshot)
                .map_err(|e| DefaultVoxFireError::buffer_size_mismatch(e.expected, e.actual))
        })?
    })
}

/// Number of entries in the active voxel list, stale entries included.
///
/// Unlike the state length this changes as voxels are authored, so re-query
/// it before every `vox_fire_copy_active`.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
/// - `out_len` must be a valid, non-null pointer this function can write to.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_active_len(
    ptr: *const VoxFireInstance,
    out_len: *mut usize,
) -> VoxFireErrorCode {
    run_ffi(|| {
        if out_len.is_null() {
            return Err(DefaultVoxFireError::null_pointer("out_len"));
        }
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_read(instance, |system| {
            unsafe {
                *out_len = system.active_voxels().len();
            }
        })
    })
}

/// Copy the active voxel list (flat grid indices) into caller memory.
///
/// Writes the current list into `out_indices` and its length into `out_len`.
/// `capacity` is the number of `uint32_t` slots the caller allocated; if the
/// list no longer fits, nothing is written and `BufferSizeMismatch` is
/// returned with the required length in the error message.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
/// - `out_indices` must be a valid, non-null pointer to `capacity` writable slots.
/// - `out_len` must be a valid, non-null pointer this function can write to.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_copy_active(
    ptr: *const VoxFireInstance,
    out_indices: *mut u32,
    capacity: usize,
    out_len: *mut usize,
) -> VoxFireErrorCode {
    run_ffi(|| {
        if out_len.is_null() {
            return Err(DefaultVoxFireError::null_pointer("out_len"));
        }
        if out_indices.is_null() {
            return Err(DefaultVoxFireError::null_pointer("out_indices"));
        }
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_read(instance, |system| {
            let active = system.active_voxels();
            if active.len() > capacity {
                return Err(DefaultVoxFireError::buffer_size_mismatch(
                    active.len(),
                    capacity,
                ));
            }
            // SAFETY: the caller guarantees `out_indices` spans `capacity`
            // writable slots, and the list fits.
            unsafe {
                ptr::copy_nonoverlapping(active.as_ptr(), out_indices, active.len());
                *out_len = active.len();
            }
            Ok(())
        })?
    })
}

/// Fetch the grid dimensions in voxels and the voxel edge length in meters.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
/// - All four out-pointers must be valid, non-null pointers this function
///   can write to.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_grid_dimensions(
    ptr: *const VoxFireInstance,
    out_size_x: *mut u32,
    out_size_y: *mut u32,
    out_size_z: *mut u32,
    out_voxel_size: *mut f32,
) -> VoxFireErrorCode {
    run_ffi(|| {
        if out_size_x.is_null() || out_size_y.is_null() || out_size_z.is_null() {
            return Err(DefaultVoxFireError::null_pointer("out_size"));
        }
        if out_voxel_size.is_null() {
            return Err(DefaultVoxFireError::null_pointer("out_voxel_size"));
        }
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_read(instance, |system| {
            let config = system.config();
            unsafe {
                *out_size_x = config.size_x;
                *out_size_y = config.size_y;
                *out_size_z = config.size_z;
                *out_voxel_size = config.voxel_size;
            }
        })
    })
}

/// The simulation clock in seconds: the sum of all effective step deltas.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
/// - `out_time` must be a valid, non-null pointer this function can write to.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_time(
    ptr: *const VoxFireInstance,
    out_time: *mut f32,
) -> VoxFireErrorCode {
    run_ffi(|| {
        if out_time.is_null() {
            return Err(DefaultVoxFireError::null_pointer("out_time"));
        }
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_read(instance, |system| {
            unsafe {
                *out_time = system.time();
            }
        })
    })
}
