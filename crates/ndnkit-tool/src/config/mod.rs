//! Tool config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use ndnkit_core::error::{NdnError, Result};

pub use schema::{EncodingSection, InterestDefaults, ToolConfig};

/// Path used when `NDNKIT_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "ndnkit.yaml";

pub fn load_from_file(path: &str) -> Result<ToolConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| NdnError::InvalidConfig(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ToolConfig> {
    let cfg: ToolConfig = serde_yaml::from_str(s)
        .map_err(|e| NdnError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load `path` if given, else `DEFAULT_CONFIG_PATH`, falling back to the
/// built-in defaults only when the default file does not exist.
pub fn load(path: Option<&str>) -> Result<ToolConfig> {
    match path {
        Some(path) => load_from_file(path),
        None => match fs::read_to_string(DEFAULT_CONFIG_PATH) {
            Ok(s) => load_from_str(&s),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = DEFAULT_CONFIG_PATH, "no config file, using defaults");
                Ok(ToolConfig::default())
            }
            Err(e) => Err(NdnError::InvalidConfig(format!(
                "read config {DEFAULT_CONFIG_PATH} failed: {e}"
            ))),
        },
    }
}
