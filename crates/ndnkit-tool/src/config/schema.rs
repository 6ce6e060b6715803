use serde::Deserialize;
use ndnkit_core::error::{NdnError, Result};
use ndnkit_core::TlvWireFormat;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    pub version: u32,

    #[serde(default)]
    pub encoding: EncodingSection,

    #[serde(default)]
    pub interest: InterestDefaults,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            version: 1,
            encoding: EncodingSection::default(),
            interest: InterestDefaults::default(),
        }
    }
}

impl ToolConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(NdnError::InvalidConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        if self.encoding.wire_format.trim().is_empty() {
            return Err(NdnError::InvalidConfig(
                "encoding.wire_format must not be empty".into(),
            ));
        }

        self.interest.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncodingSection {
    /// Name of a registered wire format; checked against the registry at
    /// startup.
    #[serde(default = "default_wire_format")]
    pub wire_format: String,
}

impl Default for EncodingSection {
    fn default() -> Self {
        Self {
            wire_format: default_wire_format(),
        }
    }
}

/// Selector values stamped onto every Interest the tool builds.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterestDefaults {
    #[serde(default = "default_lifetime_ms")]
    pub lifetime_ms: Option<u64>,

    #[serde(default)]
    pub must_be_fresh: bool,

    #[serde(default)]
    pub scope: Option<u32>,

    #[serde(default)]
    pub child_selector: Option<u32>,

    #[serde(default)]
    pub min_suffix_components: Option<u32>,

    #[serde(default)]
    pub max_suffix_components: Option<u32>,
}

impl Default for InterestDefaults {
    fn default() -> Self {
        Self {
            lifetime_ms: default_lifetime_ms(),
            must_be_fresh: false,
            scope: None,
            child_selector: None,
            min_suffix_components: None,
            max_suffix_components: None,
        }
    }
}

impl InterestDefaults {
    pub fn validate(&self) -> Result<()> {
        if let Some(ms) = self.lifetime_ms {
            if !(1..=3_600_000).contains(&ms) {
                return Err(NdnError::InvalidConfig(
                    "interest.lifetime_ms must be between 1 and 3600000".into(),
                ));
            }
        }
        if matches!(self.scope, Some(s) if s > 2) {
            return Err(NdnError::InvalidConfig(
                "interest.scope must be 0, 1 or 2".into(),
            ));
        }
        if matches!(self.child_selector, Some(c) if c > 1) {
            return Err(NdnError::InvalidConfig(
                "interest.child_selector must be 0 or 1".into(),
            ));
        }
        if let (Some(min), Some(max)) = (self.min_suffix_components, self.max_suffix_components) {
            if min > max {
                return Err(NdnError::InvalidConfig(
                    "interest.min_suffix_components must not exceed max_suffix_components".into(),
                ));
            }
        }
        Ok(())
    }
}

fn default_wire_format() -> String {
    TlvWireFormat::NAME.into()
}
fn default_lifetime_ms() -> Option<u64> {
    Some(4000)
}
