use crate::arb::{ArbAccess, ArbData};
use crate::error::Result;
use crate::ident::validate_identifier;

/// A named command: interface and operation identifiers plus an [`ArbData`]
/// payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ArbCmd {
    interface_identifier: String,
    operation_identifier: String,
    data: ArbData,
}

impl ArbCmd {
    /// Builds a command with an empty payload. The interface identifier is
    /// checked first; the first failure is returned as-is.
    pub fn new(interface: impl Into<String>, operation: impl Into<String>) -> Result<Self> {
        Self::with_data(interface, operation, ArbData::new())
    }

    pub fn with_data(
        interface: impl Into<String>,
        operation: impl Into<String>,
        data: ArbData,
    ) -> Result<Self> {
        let interface_identifier = interface.into();
        let operation_identifier = operation.into();
        validate_identifier(&interface_identifier)?;
        validate_identifier(&operation_identifier)?;
        Ok(ArbCmd {
            interface_identifier,
            operation_identifier,
            data,
        })
    }

    pub fn interface_identifier(&self) -> &str {
        &self.interface_identifier
    }

    pub fn operation_identifier(&self) -> &str {
        &self.operation_identifier
    }

    pub fn data(&self) -> &ArbData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ArbData {
        &mut self.data
    }
}

impl ArbAccess for ArbCmd {
    fn arb(&self) -> &ArbData {
        &self.data
    }

    fn arb_mut(&mut self) -> &mut ArbData {
        &mut self.data
    }
}
