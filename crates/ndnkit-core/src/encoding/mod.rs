//! Wire formats.
//!
//! `WireFormat` is the seam between the packet model and a concrete binary
//! encoding. The library default is NDN-TLV (`TlvWireFormat`). Applications
//! that need a different default keep a `WireFormatRegistry` built once at
//! startup and pass the resolved format to `wire_encode` / `wire_decode`
//! explicitly; there is no mutable global default.

pub mod tlv;
pub mod tlv_wire_format;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{NdnError, Result};
use crate::interest::Interest;
use crate::util::Blob;

pub use tlv_wire_format::TlvWireFormat;

/// A binary encoding for packets.
///
/// Implementations override the packet types they support; the defaults
/// fail with `UnsupportedFormat`.
pub trait WireFormat: Send + Sync + fmt::Debug {
    /// Registry key, e.g. `"ndn-tlv"`.
    fn name(&self) -> &'static str;

    /// Encode `interest`. Must not change its content.
    fn encode_interest(&self, _interest: &Interest) -> Result<Blob> {
        Err(NdnError::UnsupportedFormat(format!(
            "{}: encode_interest is not implemented",
            self.name()
        )))
    }

    /// Overwrite `interest` from `input`.
    fn decode_interest(&self, _interest: &mut Interest, _input: &[u8]) -> Result<()> {
        Err(NdnError::UnsupportedFormat(format!(
            "{}: decode_interest is not implemented",
            self.name()
        )))
    }
}

static DEFAULT_WIRE_FORMAT: TlvWireFormat = TlvWireFormat;

/// The library default wire format (NDN-TLV).
pub fn default_wire_format() -> &'static dyn WireFormat {
    &DEFAULT_WIRE_FORMAT
}

/// Named wire formats plus the one to use when a caller does not pick one.
///
/// Construct once at process start, then share (it is `Clone` and the
/// formats are `Arc`ed).
#[derive(Debug, Clone)]
pub struct WireFormatRegistry {
    formats: HashMap<&'static str, Arc<dyn WireFormat>>,
    default: Arc<dyn WireFormat>,
}

impl WireFormatRegistry {
    /// Registry holding NDN-TLV, which is also the default.
    pub fn new() -> Self {
        let tlv: Arc<dyn WireFormat> = Arc::new(TlvWireFormat);
        let mut formats = HashMap::new();
        formats.insert(tlv.name(), tlv.clone());
        Self {
            formats,
            default: tlv,
        }
    }

    /// Add or replace a format under its `name()`.
    pub fn register(&mut self, wire_format: Arc<dyn WireFormat>) {
        self.formats.insert(wire_format.name(), wire_format);
    }

    pub fn registered(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.formats.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn WireFormat>> {
        self.formats.get(name).cloned()
    }

    /// Make the registered format `name` the default.
    pub fn set_default(&mut self, name: &str) -> Result<()> {
        let wire_format = self
            .get(name)
            .ok_or_else(|| NdnError::UnsupportedFormat(format!("unknown wire format: {name}")))?;
        self.default = wire_format;
        Ok(())
    }

    pub fn default_format(&self) -> &dyn WireFormat {
        &*self.default
    }

    /// The named format, or the default for `None`.
    pub fn resolve(&self, name: Option<&str>) -> Result<&dyn WireFormat> {
        match name {
            None => Ok(self.default_format()),
            Some(name) => self
                .formats
                .get(name)
                .map(|f| &**f)
                .ok_or_else(|| NdnError::UnsupportedFormat(format!("unknown wire format: {name}"))),
        }
    }
}

impl Default for WireFormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
