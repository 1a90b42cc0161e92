//! Shared, version-pinned ABI identifiers.
//!
//! These constants are the single source of truth for the version strings and
//! configuration names that cross the C boundary. Bump the version whenever a
//! symbol, enum value or ownership rule of the `arbi_*` surface changes.

use std::ffi::CStr;

pub const ARBI_ABI_VERSION: u32 = 1;
pub const ARBI_ABI_SCHEMA_VERSION: &str = "arbi.abi@0.1.0";
pub const ARBI_ABI_SCHEMA_VERSION_CSTR: &CStr = c"arbi.abi@0.1.0";

/// Cap on simultaneously live handles in the process-wide table (0 = unlimited).
pub const ENV_MAX_LIVE_HANDLES: &str = "ARBI_MAX_LIVE_HANDLES";
/// Whether a successful ABI call clears the calling thread's error slot.
pub const ENV_CLEAR_ERROR_ON_SUCCESS: &str = "ARBI_CLEAR_ERROR_ON_SUCCESS";
