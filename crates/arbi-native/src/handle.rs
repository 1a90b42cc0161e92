use std::ffi::c_char;

use tracing::debug;

use crate::api::{api_return_none, api_return_string, return_string, table};
use crate::{arbi_handle_t, arbi_handle_type_t, arbi_return_t};

/// Returns the type of object behind `handle`, or `Invalid`. Never touches
/// the error slot.
#[no_mangle]
pub extern "C" fn arbi_handle_type(handle: arbi_handle_t) -> arbi_handle_type_t {
    table().handle_type(handle)
}

/// Returns a debug rendering of the object behind `handle`, or null.
///
/// The caller frees the result with `arbi_string_free`.
#[no_mangle]
pub extern "C" fn arbi_handle_dump(handle: arbi_handle_t) -> *mut c_char {
    api_return_string(|| return_string(table().dump(handle)?))
}

/// Deletes the object behind `handle`. The number stays invalid forever.
#[no_mangle]
pub extern "C" fn arbi_handle_delete(handle: arbi_handle_t) -> arbi_return_t {
    api_return_none(|| table().delete(handle))
}

/// Deletes every live handle.
#[no_mangle]
pub extern "C" fn arbi_handle_delete_all() -> arbi_return_t {
    api_return_none(|| {
        let count = table().clear();
        debug!(count, "deleted all handles");
        Ok(())
    })
}

/// Fails, listing the live handles, unless the table is empty.
#[no_mangle]
pub extern "C" fn arbi_handle_leak_check() -> arbi_return_t {
    api_return_none(|| table().leak_check())
}
