use std::ffi::c_char;

use arbi_core::ArbCmd;

use crate::api::{
    api_return_bool, api_return_handle, api_return_string, receive_bytes, receive_str,
    return_string, table,
};
use crate::{arbi_bool_return_t, arbi_handle_t};

/// Creates a command with an empty payload.
///
/// Both identifiers must match `[a-zA-Z0-9_]+`. Returns 0 on failure.
#[no_mangle]
pub unsafe extern "C" fn arbi_cmd_new(
    iface: *const c_char,
    oper: *const c_char,
) -> arbi_handle_t {
    api_return_handle(|| {
        let iface = receive_str(iface)?;
        let oper = receive_str(oper)?;
        table().insert(ArbCmd::new(iface, oper)?)
    })
}

/// Returns a copy of the interface identifier; free with `arbi_string_free`.
#[no_mangle]
pub extern "C" fn arbi_cmd_iface_get(cmd: arbi_handle_t) -> *mut c_char {
    api_return_string(|| {
        table().with_cmd(cmd, |cmd| return_string(cmd.interface_identifier()))
    })
}

/// Returns a copy of the operation identifier; free with `arbi_string_free`.
#[no_mangle]
pub extern "C" fn arbi_cmd_oper_get(cmd: arbi_handle_t) -> *mut c_char {
    api_return_string(|| {
        table().with_cmd(cmd, |cmd| return_string(cmd.operation_identifier()))
    })
}

/// Case-sensitive comparison of the interface identifier with `iface`.
#[no_mangle]
pub unsafe extern "C" fn arbi_cmd_iface_cmp(
    cmd: arbi_handle_t,
    iface: *const c_char,
) -> arbi_bool_return_t {
    api_return_bool(|| {
        let iface = receive_bytes(iface)?;
        table().with_cmd(cmd, |cmd| Ok(cmd.interface_identifier().as_bytes() == iface))
    })
}

/// Case-sensitive comparison of the operation identifier with `oper`.
#[no_mangle]
pub unsafe extern "C" fn arbi_cmd_oper_cmp(
    cmd: arbi_handle_t,
    oper: *const c_char,
) -> arbi_bool_return_t {
    api_return_bool(|| {
        let oper = receive_bytes(oper)?;
        table().with_cmd(cmd, |cmd| Ok(cmd.operation_identifier().as_bytes() == oper))
    })
}
