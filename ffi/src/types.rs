//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! The fetcher handle is opaque to C. Outcomes cross the boundary as a single
//! `i32`: `0` for success, the HTTP status for status failures, and a
//! negative `FfiErrorCode` for everything else. Conversion lives here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::c_void;
use std::os::raw::c_char;

use json_fetch::{FetchError, JsonFetcher, UreqTransport};

/// Opaque handle owning a Tokio runtime and a fetcher. C callers receive a
/// pointer to this and pass it back into every FFI function.
pub struct FfiJsonFetcher {
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) inner: JsonFetcher<UreqTransport>,
}

/// Completion callback.
///
/// `error_status` is `0` on success, the HTTP status code when the server
/// answered with anything but 200, or a negative `FfiErrorCode`. `json` is
/// the compact JSON text on success and null otherwise; it is only valid for
/// the duration of the call.
pub type FfiFetchCallback =
    extern "C" fn(user_data: *mut c_void, error_status: i32, json: *const c_char);

/// Result codes, returned by `json_fetch` and passed to callbacks as
/// negative `error_status` values.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidUrl = -1,
    Decode = -2,
    Transport = -3,
    Timeout = -4,
    NullArg = -10,
    InvalidUtf8 = -11,
    Panic = -12,
}

/// The `error_status` reported to C for a failed fetch.
pub(crate) fn error_status(e: &FetchError) -> i32 {
    let code = match e {
        FetchError::Status { status } => return i32::from(*status),
        FetchError::Decode(_) => FfiErrorCode::Decode,
        FetchError::InvalidUrl { .. } => FfiErrorCode::InvalidUrl,
        FetchError::Transport(_) => FfiErrorCode::Transport,
        FetchError::Timeout(_) => FfiErrorCode::Timeout,
    };
    code as i32
}

/// Caller context handed back to the callback.
///
/// The pointer is never dereferenced on the Rust side; making it `Send` is
/// the C caller's promise that the callback may run on a runtime thread.
pub(crate) struct UserData(*mut c_void);

unsafe impl Send for UserData {}

impl UserData {
    pub(crate) fn new(ptr: *mut c_void) -> Self {
        Self(ptr)
    }

    pub(crate) fn get(&self) -> *mut c_void {
        self.0
    }
}
