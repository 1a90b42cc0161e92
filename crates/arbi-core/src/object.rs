use crate::arb::{ArbAccess, ArbData};
use crate::cmd::ArbCmd;
use crate::error::{Error, Result};

/// Type tag reported for a handle. The discriminants are ABI values.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HandleType {
    Invalid = 0,
    ArbData = 100,
    ArbCmd = 101,
}

/// Everything a [`crate::HandleTable`] can own.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    ArbData(ArbData),
    ArbCmd(ArbCmd),
}

impl Object {
    pub fn handle_type(&self) -> HandleType {
        match self {
            Object::ArbData(_) => HandleType::ArbData,
            Object::ArbCmd(_) => HandleType::ArbCmd,
        }
    }

    pub fn as_cmd(&self) -> Result<&ArbCmd> {
        match self {
            Object::ArbCmd(cmd) => Ok(cmd),
            _ => Err(not_a_cmd()),
        }
    }

    pub fn as_cmd_mut(&mut self) -> Result<&mut ArbCmd> {
        match self {
            Object::ArbCmd(cmd) => Ok(cmd),
            _ => Err(not_a_cmd()),
        }
    }
}

fn not_a_cmd() -> Error {
    Error::invalid_argument("object does not support the cmd interface")
}

impl ArbAccess for Object {
    fn arb(&self) -> &ArbData {
        match self {
            Object::ArbData(data) => data,
            Object::ArbCmd(cmd) => cmd.arb(),
        }
    }

    fn arb_mut(&mut self) -> &mut ArbData {
        match self {
            Object::ArbData(data) => data,
            Object::ArbCmd(cmd) => cmd.arb_mut(),
        }
    }
}

impl From<ArbData> for Object {
    fn from(data: ArbData) -> Self {
        Object::ArbData(data)
    }
}

impl From<ArbCmd> for Object {
    fn from(cmd: ArbCmd) -> Self {
        Object::ArbCmd(cmd)
    }
}
