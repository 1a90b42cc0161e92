use std::ffi::{c_char, CStr, CString};

use arbi_contracts::{ARBI_ABI_SCHEMA_VERSION_CSTR, ARBI_ABI_VERSION};

use crate::api::{clear_last_error, last_error_ptr, set_last_error};

/// Returns the last error recorded on the calling thread, or null.
///
/// The pointer is borrowed and stays valid until the next `arbi_*` call on
/// this thread. Do not free it.
#[no_mangle]
pub extern "C" fn arbi_explain() -> *const c_char {
    last_error_ptr()
}

/// Stores `msg` as the calling thread's last error; null clears it.
///
/// Callbacks use this to hand failure text back to the host.
#[no_mangle]
pub unsafe extern "C" fn arbi_error_set(msg: *const c_char) {
    if msg.is_null() {
        clear_last_error();
    } else {
        set_last_error(CStr::from_ptr(msg).to_bytes());
    }
}

/// Releases a string returned by an `arbi_*` function. Null is ignored.
#[no_mangle]
pub unsafe extern "C" fn arbi_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

#[no_mangle]
pub extern "C" fn arbi_abi_version() -> u32 {
    ARBI_ABI_VERSION
}

/// Static version string; not to be freed.
#[no_mangle]
pub extern "C" fn arbi_abi_version_string() -> *const c_char {
    ARBI_ABI_SCHEMA_VERSION_CSTR.as_ptr()
}
