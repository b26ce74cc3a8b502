//! C-ABI wrapper around `json-fetch-core`.
//!
//! # Overview
//! Lets any language with a C FFI fetch a JSON document and receive the
//! outcome through a plain function pointer, without linking to Tokio or
//! serde directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A fetcher handle owns its own multi-threaded Tokio runtime; callbacks
//!   run on one of its worker threads, never inside `json_fetch` itself.
//! - The C caller owns the handle and must release it with
//!   `json_fetcher_free`.

pub mod types;

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use json_fetch::{FetchConfig, FetchError, JsonFetcher, UreqTransport};
use serde_json::Value;

use types::*;

// ---------------------------------------------------------------------------
// Fetcher lifecycle
// ---------------------------------------------------------------------------

/// Create a fetcher. `timeout_ms` limits each request; `0` means no limit,
/// in which case a request to a server that never answers never calls back.
///
/// Returns null if the runtime cannot be started or an internal panic occurs.
/// The caller must free the returned pointer with `json_fetcher_free`.
#[unsafe(no_mangle)]
pub extern "C" fn json_fetcher_new(timeout_ms: u64) -> *mut FfiJsonFetcher {
    catch_unwind(|| {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                log::warn!("json_fetcher_new: cannot start runtime: {e}");
                return std::ptr::null_mut();
            }
        };
        let config = FetchConfig::with_timeout_ms(timeout_ms);
        let inner = JsonFetcher::with_config(UreqTransport::from_config(&config), config);
        Box::into_raw(Box::new(FfiJsonFetcher { runtime, inner }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a fetcher created by `json_fetcher_new`. Safe to call with null.
///
/// Requests still in flight are abandoned and their callbacks never run.
#[unsafe(no_mangle)]
pub extern "C" fn json_fetcher_free(fetcher: *mut FfiJsonFetcher) {
    if fetcher.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let FfiJsonFetcher { runtime, inner } = *unsafe { Box::from_raw(fetcher) };
        drop(inner);
        runtime.shutdown_background();
    }));
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// Start fetching `url` and return immediately.
///
/// On `Ok`, `callback(user_data, error_status, json)` runs exactly once
/// later, on a runtime thread (see `FfiFetchCallback`). On any other return
/// code the callback never runs.
#[unsafe(no_mangle)]
pub extern "C" fn json_fetch(
    fetcher: *const FfiJsonFetcher,
    url: *const c_char,
    callback: Option<FfiFetchCallback>,
    user_data: *mut c_void,
) -> FfiErrorCode {
    let user_data = UserData::new(user_data);
    catch_unwind(AssertUnwindSafe(move || {
        let Some(callback) = callback else {
            return FfiErrorCode::NullArg;
        };
        if fetcher.is_null() || url.is_null() {
            return FfiErrorCode::NullArg;
        }
        let fetcher = unsafe { &*fetcher };
        let url = match unsafe { CStr::from_ptr(url) }.to_str() {
            Ok(url) => url.to_string(),
            Err(_) => return FfiErrorCode::InvalidUtf8,
        };

        let _guard = fetcher.runtime.enter();
        fetcher
            .inner
            .fetch_json(url, move |outcome| deliver(callback, user_data, outcome));
        FfiErrorCode::Ok
    }))
    .unwrap_or(FfiErrorCode::Panic)
}

fn deliver(callback: FfiFetchCallback, user_data: UserData, outcome: Result<Value, FetchError>) {
    let error = match outcome {
        Ok(value) => match CString::new(value.to_string()) {
            Ok(json) => {
                callback(user_data.get(), 0, json.as_ptr());
                return;
            }
            // serde_json escapes NUL, so this only guards against a broken encoder.
            Err(_) => FfiErrorCode::Decode as i32,
        },
        Err(e) => {
            log::debug!("json_fetch failed: {e}");
            error_status(&e)
        }
    };
    callback(user_data.get(), error, std::ptr::null());
}
