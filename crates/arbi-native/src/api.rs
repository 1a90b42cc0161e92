use std::any::Any;
use std::cell::RefCell;
use std::ffi::{c_char, c_void, CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;

use arbi_contracts::ENV_CLEAR_ERROR_ON_SUCCESS;
use arbi_core::config::env_bool;
use arbi_core::{Error, HandleTable, Result, TableConfig};
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::{arbi_bool_return_t, arbi_handle_t, arbi_return_t, arbi_ssize_t};

#[derive(Debug, Clone, Copy)]
struct Policy {
    clear_error_on_success: bool,
}

static POLICY: OnceCell<Policy> = OnceCell::new();
static TABLE: OnceCell<HandleTable> = OnceCell::new();

fn load_policy() -> Policy {
    Policy {
        clear_error_on_success: env_bool(ENV_CLEAR_ERROR_ON_SUCCESS, true),
    }
}

fn policy() -> &'static Policy {
    POLICY.get_or_init(load_policy)
}

pub(crate) fn table() -> &'static HandleTable {
    TABLE.get_or_init(|| HandleTable::with_config(TableConfig::from_env()))
}

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

pub(crate) fn set_last_error(msg: impl Into<Vec<u8>>) {
    let mut bytes = msg.into();
    bytes.retain(|&b| b != 0);
    let msg = CString::new(bytes).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(msg));
}

pub(crate) fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

/// Borrowed from the slot; valid until the slot is next written.
pub(crate) fn last_error_ptr() -> *const c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(ptr::null(), |msg| msg.as_ptr())
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn api_call<T>(fail: T, f: impl FnOnce() -> Result<T>) -> T {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => {
            if policy().clear_error_on_success {
                clear_last_error();
            }
            value
        }
        Ok(Err(err)) => {
            debug!(error = %err, "arbi call failed");
            set_last_error(err.to_string());
            fail
        }
        Err(payload) => {
            let msg = panic_message(payload.as_ref());
            warn!(panic = %msg, "arbi call panicked");
            set_last_error(Error::Internal(msg).to_string());
            fail
        }
    }
}

pub(crate) fn api_return_handle(f: impl FnOnce() -> Result<arbi_handle_t>) -> arbi_handle_t {
    api_call(0, f)
}

pub(crate) fn api_return_none(f: impl FnOnce() -> Result<()>) -> arbi_return_t {
    api_call(arbi_return_t::Failure, || {
        f().map(|()| arbi_return_t::Success)
    })
}

pub(crate) fn api_return_bool(f: impl FnOnce() -> Result<bool>) -> arbi_bool_return_t {
    api_call(arbi_bool_return_t::Failure, || f().map(Into::into))
}

pub(crate) fn api_return_size(f: impl FnOnce() -> Result<usize>) -> arbi_ssize_t {
    api_call(-1, || f().map(|n| n as arbi_ssize_t))
}

pub(crate) fn api_return_string(f: impl FnOnce() -> Result<CString>) -> *mut c_char {
    api_call(ptr::null_mut(), || f().map(CString::into_raw))
}

pub(crate) unsafe fn receive_bytes<'a>(s: *const c_char) -> Result<&'a [u8]> {
    if s.is_null() {
        return Err(Error::invalid_argument("unexpected NULL string"));
    }
    Ok(CStr::from_ptr(s).to_bytes())
}

pub(crate) unsafe fn receive_str<'a>(s: *const c_char) -> Result<&'a str> {
    let bytes = receive_bytes(s)?;
    std::str::from_utf8(bytes).map_err(|_| Error::invalid_argument("string is not valid UTF-8"))
}

/// `obj` may be null only for an empty buffer.
pub(crate) unsafe fn receive_raw<'a>(obj: *const c_void, size: usize) -> Result<&'a [u8]> {
    if size == 0 {
        return Ok(&[]);
    }
    if obj.is_null() {
        return Err(Error::invalid_argument("unexpected NULL pointer"));
    }
    Ok(std::slice::from_raw_parts(obj as *const u8, size))
}

pub(crate) unsafe fn receive_out_buffer<'a>(obj: *mut c_void, size: usize) -> Result<&'a mut [u8]> {
    if size == 0 {
        return Ok(&mut []);
    }
    if obj.is_null() {
        return Err(Error::invalid_argument("unexpected NULL pointer"));
    }
    Ok(std::slice::from_raw_parts_mut(obj as *mut u8, size))
}

/// Copies as much of `src` as fits and returns the full length of `src`.
pub(crate) fn fill_buffer(dst: &mut [u8], src: &[u8]) -> usize {
    let n = dst.len().min(src.len());
    dst[..n].copy_from_slice(&src[..n]);
    src.len()
}

pub(crate) fn return_string(s: impl Into<Vec<u8>>) -> Result<CString> {
    CString::new(s).map_err(|_| Error::Internal("string contains a NUL byte".to_string()))
}
