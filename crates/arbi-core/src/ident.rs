use crate::error::{Error, Result};

/// Checks that `ident` is a valid interface or operation identifier.
///
/// Identifiers are non-empty and consist of `[a-zA-Z0-9_]` only.
pub fn validate_identifier(ident: &str) -> Result<()> {
    if ident.is_empty() {
        return Err(Error::invalid_argument("identifiers must not be empty"));
    }
    if !ident.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return Err(Error::invalid_argument(format!(
            "\"{ident}\" is not a valid identifier; it contains characters outside [a-zA-Z0-9_]"
        )));
    }
    Ok(())
}
