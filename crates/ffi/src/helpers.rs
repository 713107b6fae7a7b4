use std::ffi::CString;

use voxfire_core::FireSystem;

use crate::error::{with_last_error_mut, DefaultVoxFireError, VoxFireError, VoxFireErrorCode};
use crate::instance::VoxFireInstance;

/// Set the thread-local error message and code.
/// Internal helper for FFI functions to record failure details.
pub(crate) fn set_last_error(error: &impl VoxFireError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl VoxFireError) -> VoxFireErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Called on successful operations so stale diagnostics never outlive them.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = VoxFireErrorCode::Ok;
    });
}

/// Run an FFI body and fold its outcome into an error code, updating the
/// thread-local last error either way.
pub(crate) fn run_ffi<F>(body: F) -> VoxFireErrorCode
where
    F: FnOnce() -> Result<(), DefaultVoxFireError>,
{
    match body() {
        Ok(()) => {
            clear_last_error();
            VoxFireErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}

/// Borrow the instance behind a raw pointer, rejecting null.
///
/// Callers must guarantee non-null pointers actually come from
/// `vox_fire_new`; nothing else can be checked from here.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const VoxFireInstance,
) -> Result<&'a VoxFireInstance, DefaultVoxFireError> {
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultVoxFireError::null_pointer("instance"))
}

/// Run `body` against the simulation under the instance's read lock.
pub(crate) fn with_system_read<T>(
    instance: &VoxFireInstance,
    body: impl FnOnce(&FireSystem) -> T,
) -> Result<T, DefaultVoxFireError> {
    let system = instance
        .system
        .read()
        .map_err(|_| DefaultVoxFireError::lock_poisoned("system"))?;
    Ok(body(&system))
}

/// Run `body` against the simulation under the instance's write lock.
pub(crate) fn with_system_write<T>(
    instance: &VoxFireInstance,
    body: impl FnOnce(&mut FireSystem) -> T,
) -> Result<T, DefaultVoxFireError> {
    let mut system = instance
        .system
        .write()
        .map_err(|_| DefaultVoxFireError::lock_poisoned("system"))?;
    Ok(body(&mut system))
}
