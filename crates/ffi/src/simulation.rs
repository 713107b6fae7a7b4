//! Stepping, authoring brushes and parameter setters.
//!
//! Everything here takes the instance's write lock. Voxel coordinates are
//! signed; coordinates or regions reaching outside the grid are clamped or
//! ignored exactly as the underlying library does, so painting along an
//! edge is not an error.

use voxfire_core::{MaterialId, WindParams, MATERIAL_COUNT};

use crate::error::{DefaultVoxFireError, VoxFireErrorCode};
use crate::helpers::{instance_from_ptr, run_ffi, with_system_write};
use crate::instance::VoxFireInstance;

/// Material ordinal for `vox_fire_set_material` and the fill brushes: empty space.
pub const VOX_FIRE_MATERIAL_AIR: u8 = 0;
/// Material ordinal: grass.
pub const VOX_FIRE_MATERIAL_GRASS: u8 = 1;
/// Material ordinal: dry brush.
pub const VOX_FIRE_MATERIAL_DRY_BRUSH: u8 = 2;
/// Material ordinal: wood.
pub const VOX_FIRE_MATERIAL_WOOD: u8 = 3;
/// Material ordinal: leaves.
pub const VOX_FIRE_MATERIAL_LEAVES: u8 = 4;
/// Material ordinal: stone.
pub const VOX_FIRE_MATERIAL_STONE: u8 = 5;
/// Material ordinal: water (moisture source).
pub const VOX_FIRE_MATERIAL_WATER: u8 = 6;
/// Material ordinal: lava (heat source).
pub const VOX_FIRE_MATERIAL_LAVA: u8 = 7;

fn material_from_raw(raw: u8) -> Result<MaterialId, DefaultVoxFireError> {
    if usize::from(raw) < MATERIAL_COUNT {
        Ok(MaterialId::from_ordinal(raw))
    } else {
        Err(DefaultVoxFireError::invalid_parameter(format!(
            "Invalid material ordinal: {raw}. Must be 0-{}",
            MATERIAL_COUNT - 1
        )))
    }
}

/// Advance the simulation by `dt_seconds` of frame time.
///
/// Long frames are clamped to the solver's maximum step and scaled by the
/// configured time scale. Non-finite or non-positive deltas are ignored by
/// the simulation (the call still returns `Ok`).
///
/// Returns
/// - `VoxFireErrorCode::Ok` (0) on success
/// - `VoxFireErrorCode::NullPointer` if `ptr` is null
/// - `VoxFireErrorCode::LockPoisoned` if the internal lock is poisoned
///
/// # Safety
/// `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_step(
    ptr: *const VoxFireInstance,
    dt_seconds: f32,
) -> VoxFireErrorCode {
    run_ffi(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_write(instance, |system| system.step(dt_seconds))
    })
}

/// Paint one voxel with a material, resetting it to that material's
/// authored state (ambient temperature, full moisture, scaled fuel).
///
/// Out-of-grid coordinates are a no-op, not an error.
///
/// Returns
/// - `VoxFireErrorCode::Ok` (0) on success
/// - `VoxFireErrorCode::NullPointer` if `ptr` is null
/// - `VoxFireErrorCode::InvalidParameter` if `material` is not a known ordinal
///
/// # Safety
/// `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_set_material(
    ptr: *const VoxFireInstance,
    x: i32,
    y: i32,
    z: i32,
    material: u8,
) -> VoxFireErrorCode {
    run_ffi(|| {
        let material = material_from_raw(material)?;
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_write(instance, |system| system.set_material(x, y, z, material))
    })
}

/// Heat a sphere of voxels around `(x, y, z)` with linear falloff, drying
/// them in proportion to the heat applied.
///
/// # Safety
/// `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_ignite(
    ptr: *const VoxFireInstance,
    x: i32,
    y: i32,
    z: i32,
    radius: f32,
) -> VoxFireErrorCode {
    run_ffi(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_write(instance, |system| system.ignite(x, y, z, radius))
    })
}

/// Soak a sphere of voxels around `(x, y, z)` with linear falloff, raising
/// moisture toward each material's capacity and cooling toward ambient.
///
/// # Safety
/// `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_wet(
    ptr: *const VoxFireInstance,
    x: i32,
    y: i32,
    z: i32,
    radius: f32,
) -> VoxFireErrorCode {
    run_ffi(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_write(instance, |system| system.wet(x, y, z, radius))
    })
}

/// Fill the axis-aligned box spanned by two corners (inclusive, any corner
/// order) with a material. The box is clamped to the grid.
///
/// Returns
/// - `VoxFireErrorCode::Ok` (0) on success
/// - `VoxFireErrorCode::NullPointer` if `ptr` is null
/// - `VoxFireErrorCode::InvalidParameter` if `material` is not a known ordinal
///
/// # Safety
/// `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_fill_region(
    ptr: *const VoxFireInstance,
    ax: i32,
    ay: i32,
    az: i32,
    bx: i32,
    by: i32,
    bz: i32,
    material: u8,
) -> VoxFireErrorCode {
    run_ffi(|| {
        let material = material_from_raw(material)?;
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_write(instance, |system| {
            system.fill_region((ax, ay, az), (bx, by, bz), material);
        })
    })
}

/// Fill a voxel sphere centered on `(cx, cy, cz)` with a material.
///
/// # Safety
/// `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_fill_sphere(
    ptr: *const VoxFireInstance,
    cx: i32,
    cy: i32,
    cz: i32,
    radius: f32,
    material: u8,
) -> VoxFireErrorCode {
    run_ffi(|| {
        let material = material_from_raw(material)?;
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_write(instance, |system| {
            system.fill_sphere(cx, cy, cz, radius, material);
        })
    })
}

/// Scatter a material through the box spanned by two corners, painting each
/// voxel with probability `density`. The same `seed` over the same box
/// yields the same scatter on every platform.
///
/// Returns
/// - `VoxFireErrorCode::Ok` (0) on success
/// - `VoxFireErrorCode::NullPointer` if `ptr` is null
/// - `VoxFireErrorCode::InvalidParameter` if `material` is not a known ordinal
///
/// # Safety
/// `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_scatter(
    ptr: *const VoxFireInstance,
    ax: i32,
    ay: i32,
    az: i32,
    bx: i32,
    by: i32,
    bz: i32,
    material: u8,
    density: f32,
    seed: u64,
) -> VoxFireErrorCode {
    run_ffi(|| {
        let material = material_from_raw(material)?;
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_write(instance, |system| {
            system.scatter((ax, ay, az), (bx, by, bz), material, density, seed);
        })
    })
}

/// Reset the world: every voxel back to air, the active list emptied, the
/// simulation clock and statistics zeroed. Parameters are left as set.
///
/// # Safety
/// `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_clear(ptr: *const VoxFireInstance) -> VoxFireErrorCode {
    run_ffi(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_write(instance, |system| system.clear())
    })
}

/// Rescan the grid and rebuild the active voxel list, dropping entries left
/// stale by bulk edits (for example painting air over fuel).
///
/// # Safety
/// `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_rebuild_active_list(
    ptr: *const VoxFireInstance,
) -> VoxFireErrorCode {
    run_ffi(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_write(instance, |system| system.rebuild_active_list())
    })
}

/// Replace the wind field parameters. The next step reads the new values.
///
/// Parameters
/// - `direction_deg`: base heading in degrees (0 blows toward +X, 90 toward +Z)
/// - `speed`: base strength, typically 0-1
/// - `turbulence`: temporal jitter amplitude
/// - `gust_frequency`: global gust pulses per second
/// - `gust_amplitude`: strength of the gust pulse
/// - `local_variation`: spatial decorrelation of direction and speed
/// - `variation_scale`: spatial frequency of that decorrelation
///
/// # Safety
/// `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_set_wind(
    ptr: *const VoxFireInstance,
    direction_deg: f32,
    speed: f32,
    turbulence: f32,
    gust_frequency: f32,
    gust_amplitude: f32,
    local_variation: f32,
    variation_scale: f32,
) -> VoxFireErrorCode {
    run_ffi(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_write(instance, |system| {
            system.wind = WindParams {
                direction_deg,
                speed,
                turbulence,
                gust_frequency,
                gust_amplitude,
                local_variation,
                variation_scale,
            };
        })
    })
}

/// Set the solver tunables. The next step reads the new values.
///
/// Reserved solver fields (radiant heat range, ember transport) keep their
/// defaults; they are not exposed until the solver reads them.
///
/// # Safety
/// `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_set_simulation(
    ptr: *const VoxFireInstance,
    time_scale: f32,
    ambient_temperature: f32,
    ambient_humidity: f32,
    convection_strength: f32,
) -> VoxFireErrorCode {
    run_ffi(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_write(instance, |system| {
            system.simulation.time_scale = time_scale;
            system.simulation.ambient_temperature = ambient_temperature;
            system.simulation.ambient_humidity = ambient_humidity;
            system.simulation.convection_strength = convection_strength;
        })
    })
}

/// Set the global burn-rate and fuel multipliers.
///
/// The burn-rate multiplier scales fuel consumption of every burning voxel;
/// the fuel multiplier scales the fuel assigned by subsequent authoring.
/// Negative or NaN inputs are floored to zero.
///
/// # Safety
/// `ptr` must be a valid pointer returned by `vox_fire_new`, or null.
#[no_mangle]
pub unsafe extern "C" fn vox_fire_set_global_multipliers(
    ptr: *const VoxFireInstance,
    burn_rate: f32,
    fuel: f32,
) -> VoxFireErrorCode {
    run_ffi(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        with_system_write(instance, |system| {
            system.set_global_multipliers(burn_rate, fuel);
        })
    })
}
