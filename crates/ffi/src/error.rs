use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// Gives every failure a code to hand across the boundary and a message for
/// the thread-local diagnostic slot read by [`vox_fire_last_error`].
pub(crate) trait VoxFireError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> VoxFireErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of [`VoxFireError`] for the common failure cases.
///
/// Wraps a [`VoxFireErrorCode`] together with a formatted message and provides
/// a constructor per error kind (except `Ok`, which represents success).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultVoxFireError {
    code: VoxFireErrorCode,
    msg: String,
}

impl DefaultVoxFireError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: VoxFireErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    ///
    /// # Arguments
    /// * `lock_name` - The name of the lock that was poisoned (e.g., `"system"`)
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: VoxFireErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for invalid parameter.
    ///
    /// # Arguments
    /// * `message` - Description of the error
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: VoxFireErrorCode::InvalidParameter,
            msg: message,
        }
    }

    /// Create error for voxel coordinates outside the grid.
    pub fn out_of_bounds(x: i32, y: i32, z: i32) -> Self {
        Self {
            code: VoxFireErrorCode::OutOfBounds,
            msg: format!("Voxel ({x}, {y}, {z}) is outside the grid"),
        }
    }

    /// Create error for a caller buffer whose length does not match.
    ///
    /// # Arguments
    /// * `expected` - Required element count
    /// * `actual` - Element count the caller provided
    pub fn buffer_size_mismatch(expected: usize, actual: usize) -> Self {
        Self {
            code: VoxFireErrorCode::BufferSizeMismatch,
            msg: format!("Buffer length {actual} does not match expected {expected}"),
        }
    }
}

impl VoxFireError for DefaultVoxFireError {
    fn code(&self) -> VoxFireErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by the simulation functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoxFireErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Null pointer passed where non-null required.
    NullPointer = 1,

    /// Internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Invalid parameter passed to function (unknown preset, unknown
    /// material ordinal).
    InvalidParameter = 3,

    /// Voxel coordinates fall outside the grid.
    OutOfBounds = 4,

    /// Caller-provided buffer length does not match the required length.
    BufferSizeMismatch = 5,
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is stored so the pointer handed out by
    /// `vox_fire_last_error` stays valid until the next FFI call on this thread.
    static LAST_ERROR: RefCell<(Option<CString>, VoxFireErrorCode)> = const { RefCell::new((None, VoxFireErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, VoxFireErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, VoxFireErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded or no call has been made yet.
///
/// # Thread Safety
/// Error messages are stored per-thread, so this is thread-safe. Each thread
/// has its own independent error state.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// VoxFireInstance* sim = nullptr;
/// if (vox_fire_new(VOX_FIRE_PRESET_SMALL, 0, 0, 0, &sim) != VoxFireErrorCode::Ok) {
///     printf("create failed: %s\n", vox_fire_last_error());
/// }
/// ```
#[no_mangle]
pub extern "C" fn vox_fire_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns:
/// - `VoxFireErrorCode::Ok` (0) if the last call on this thread succeeded
/// - The specific error code from the last failed operation
///
/// # Thread Safety
/// Error codes are stored per-thread, so this is thread-safe.
#[no_mangle]
pub extern "C" fn vox_fire_last_error_code() -> VoxFireErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
