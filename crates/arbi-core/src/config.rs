use arbi_contracts::ENV_MAX_LIVE_HANDLES;

pub fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

pub fn env_u32_nonzero(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&v| v != 0)
        .unwrap_or(default)
}

/// Limits applied by a [`crate::HandleTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableConfig {
    /// Maximum number of simultaneously live handles; 0 means unlimited.
    pub max_live_handles: u32,
}

impl TableConfig {
    pub fn from_env() -> Self {
        TableConfig {
            max_live_handles: env_u32_nonzero(ENV_MAX_LIVE_HANDLES, 0),
        }
    }
}
