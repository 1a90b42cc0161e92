//! Host-side object model behind the `arbi_*` C ABI.
//!
//! Foreign callers never see Rust pointers. They hold integer handles into a
//! [`HandleTable`], which owns every [`ArbData`] and [`ArbCmd`] it hands out.
//! The table is an ordinary value so tests and embedders can run isolated
//! instances; the C ABI crate keeps a single process-wide one.

pub mod arb;
pub mod cmd;
pub mod config;
pub mod error;
pub mod ident;
pub mod object;
pub mod table;

pub use arb::{ArbAccess, ArbData};
pub use cmd::ArbCmd;
pub use config::TableConfig;
pub use error::{Error, Result};
pub use ident::validate_identifier;
pub use object::{HandleType, Object};
pub use table::{Handle, HandleTable};
