use std::ffi::{c_char, c_void, CString};

use arbi_core::{ArbData, Error};

use crate::api::{
    api_return_handle, api_return_none, api_return_size, api_return_string, fill_buffer,
    receive_bytes, receive_out_buffer, receive_raw, receive_str, return_string, table,
};
use crate::{arbi_handle_t, arbi_return_t, arbi_ssize_t};

fn arg_to_cstring(arg: Vec<u8>) -> std::result::Result<CString, Vec<u8>> {
    CString::new(arg).map_err(|err| err.into_vec())
}

fn nul_in_arg() -> Error {
    Error::invalid_argument("argument contains a NUL byte; use the raw accessors")
}

/// Creates an empty ArbData object (`{}` and no arguments).
#[no_mangle]
pub extern "C" fn arbi_arb_new() -> arbi_handle_t {
    api_return_handle(|| table().insert(ArbData::new()))
}

/// Replaces the JSON document of an ArbData or ArbCmd. The object is left
/// unchanged if `json` does not parse to a JSON object.
#[no_mangle]
pub unsafe extern "C" fn arbi_arb_json_set_str(
    arb: arbi_handle_t,
    json: *const c_char,
) -> arbi_return_t {
    api_return_none(|| {
        let json = receive_str(json)?;
        table().with_arb_mut(arb, |data| data.set_json_str(json))
    })
}

/// Returns the JSON document as compact text; free with `arbi_string_free`.
#[no_mangle]
pub extern "C" fn arbi_arb_json_get_str(arb: arbi_handle_t) -> *mut c_char {
    api_return_string(|| table().with_arb(arb, |data| return_string(data.json_str())))
}

/// Appends a string argument.
#[no_mangle]
pub unsafe extern "C" fn arbi_arb_push_str(arb: arbi_handle_t, s: *const c_char) -> arbi_return_t {
    api_return_none(|| {
        let s = receive_bytes(s)?;
        table().with_arb_mut(arb, |data| {
            data.push_arg(s);
            Ok(())
        })
    })
}

/// Appends `obj_size` bytes from `obj` as an argument.
#[no_mangle]
pub unsafe extern "C" fn arbi_arb_push_raw(
    arb: arbi_handle_t,
    obj: *const c_void,
    obj_size: usize,
) -> arbi_return_t {
    api_return_none(|| {
        let obj = receive_raw(obj, obj_size)?;
        table().with_arb_mut(arb, |data| {
            data.push_arg(obj);
            Ok(())
        })
    })
}

/// Removes and returns the last argument as a string; free with
/// `arbi_string_free`. Nothing is removed if the argument holds a NUL byte.
#[no_mangle]
pub extern "C" fn arbi_arb_pop_str(arb: arbi_handle_t) -> *mut c_char {
    api_return_string(|| {
        table().with_arb_mut(arb, |data| {
            let arg = data.pop_arg()?;
            arg_to_cstring(arg).map_err(|arg| {
                data.push_arg(arg);
                nul_in_arg()
            })
        })
    })
}

/// Removes the last argument and copies up to `obj_size` bytes of it into
/// `obj`. Returns the full size of the argument, which is consumed even if
/// the buffer was too small.
#[no_mangle]
pub unsafe extern "C" fn arbi_arb_pop_raw(
    arb: arbi_handle_t,
    obj: *mut c_void,
    obj_size: usize,
) -> arbi_ssize_t {
    api_return_size(|| {
        let out = receive_out_buffer(obj, obj_size)?;
        table().with_arb_mut(arb, |data| {
            let arg = data.pop_arg()?;
            Ok(fill_buffer(out, &arg))
        })
    })
}

/// Inserts a string argument before `index`; `-1` appends.
#[no_mangle]
pub unsafe extern "C" fn arbi_arb_insert_str(
    arb: arbi_handle_t,
    index: arbi_ssize_t,
    s: *const c_char,
) -> arbi_return_t {
    api_return_none(|| {
        let s = receive_bytes(s)?;
        table().with_arb_mut(arb, |data| data.insert_arg(index, s))
    })
}

#[no_mangle]
pub unsafe extern "C" fn arbi_arb_insert_raw(
    arb: arbi_handle_t,
    index: arbi_ssize_t,
    obj: *const c_void,
    obj_size: usize,
) -> arbi_return_t {
    api_return_none(|| {
        let obj = receive_raw(obj, obj_size)?;
        table().with_arb_mut(arb, |data| data.insert_arg(index, obj))
    })
}

/// Replaces the argument at `index` with a string.
#[no_mangle]
pub unsafe extern "C" fn arbi_arb_set_str(
    arb: arbi_handle_t,
    index: arbi_ssize_t,
    s: *const c_char,
) -> arbi_return_t {
    api_return_none(|| {
        let s = receive_bytes(s)?;
        table().with_arb_mut(arb, |data| data.set_arg(index, s))
    })
}

#[no_mangle]
pub unsafe extern "C" fn arbi_arb_set_raw(
    arb: arbi_handle_t,
    index: arbi_ssize_t,
    obj: *const c_void,
    obj_size: usize,
) -> arbi_return_t {
    api_return_none(|| {
        let obj = receive_raw(obj, obj_size)?;
        table().with_arb_mut(arb, |data| data.set_arg(index, obj))
    })
}

/// Returns a copy of the argument at `index`; free with `arbi_string_free`.
#[no_mangle]
pub extern "C" fn arbi_arb_get_str(arb: arbi_handle_t, index: arbi_ssize_t) -> *mut c_char {
    api_return_string(|| {
        table().with_arb(arb, |data| {
            arg_to_cstring(data.arg(index)?.to_vec()).map_err(|_| nul_in_arg())
        })
    })
}

/// Copies up to `obj_size` bytes of the argument at `index` into `obj` and
/// returns its full size.
#[no_mangle]
pub unsafe extern "C" fn arbi_arb_get_raw(
    arb: arbi_handle_t,
    index: arbi_ssize_t,
    obj: *mut c_void,
    obj_size: usize,
) -> arbi_ssize_t {
    api_return_size(|| {
        let out = receive_out_buffer(obj, obj_size)?;
        table().with_arb(arb, |data| Ok(fill_buffer(out, data.arg(index)?)))
    })
}

/// Size in bytes of the argument at `index`.
#[no_mangle]
pub extern "C" fn arbi_arb_get_size(arb: arbi_handle_t, index: arbi_ssize_t) -> arbi_ssize_t {
    api_return_size(|| table().with_arb(arb, |data| Ok(data.arg(index)?.len())))
}

#[no_mangle]
pub extern "C" fn arbi_arb_remove(arb: arbi_handle_t, index: arbi_ssize_t) -> arbi_return_t {
    api_return_none(|| table().with_arb_mut(arb, |data| data.remove_arg(index).map(drop)))
}

/// Number of arguments, or -1 on failure.
#[no_mangle]
pub extern "C" fn arbi_arb_len(arb: arbi_handle_t) -> arbi_ssize_t {
    api_return_size(|| table().with_arb(arb, |data| Ok(data.len())))
}

/// Removes all arguments; the JSON document is kept.
#[no_mangle]
pub extern "C" fn arbi_arb_clear(arb: arbi_handle_t) -> arbi_return_t {
    api_return_none(|| {
        table().with_arb_mut(arb, |data| {
            data.clear_args();
            Ok(())
        })
    })
}

/// Deep-copies the ArbData of `src` into `dst`. Either may be a command;
/// only the payload is copied.
#[no_mangle]
pub extern "C" fn arbi_arb_assign(dst: arbi_handle_t, src: arbi_handle_t) -> arbi_return_t {
    api_return_none(|| table().assign_arb(dst, src))
}
