#![allow(non_camel_case_types)]
#![allow(clippy::missing_safety_doc)]

//! C ABI over the `arbi-core` object model.
//!
//! Every entry point catches panics, records failures in a thread-local slot
//! readable through [`arbi_explain`], and returns a sentinel: `0` for
//! handles, [`arbi_return_t::Failure`], [`arbi_bool_return_t::Failure`], `-1`
//! for sizes, or a null string.
//!
//! Strings returned as `*mut c_char` are owned by the caller and must be
//! released with [`arbi_string_free`].

mod api;
mod arb;
mod cmd;
mod error;
mod handle;

pub use arb::*;
pub use cmd::*;
pub use error::*;
pub use handle::*;

pub type arbi_handle_t = u64;
pub type arbi_ssize_t = isize;
pub type arbi_handle_type_t = arbi_core::HandleType;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum arbi_return_t {
    Failure = -1,
    Success = 0,
}

/// Result of a comparison that can itself fail.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum arbi_bool_return_t {
    Failure = -1,
    False = 0,
    True = 1,
}

impl From<bool> for arbi_bool_return_t {
    fn from(b: bool) -> Self {
        if b {
            arbi_bool_return_t::True
        } else {
            arbi_bool_return_t::False
        }
    }
}
