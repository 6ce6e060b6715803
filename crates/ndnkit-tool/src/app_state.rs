//! Shared state for the ndnkit tool.
//!
//! - Resolve the configured wire format once at startup (unknown name is a
//!   startup error, not a per-request one).
//! - Encode / decode Interests through that format.

use std::sync::Arc;

use ndnkit_core::error::Result;
use ndnkit_core::{Blob, Interest, WireFormatRegistry};

use crate::config::ToolConfig;
use crate::template;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ToolConfig,
    registry: WireFormatRegistry,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can report a bad config instead of panicking.
    pub fn new(cfg: ToolConfig) -> Result<Self> {
        Self::with_registry(cfg, WireFormatRegistry::new())
    }

    /// Same as `new`, with extra wire formats already registered.
    pub fn with_registry(cfg: ToolConfig, mut registry: WireFormatRegistry) -> Result<Self> {
        registry.set_default(&cfg.encoding.wire_format)?;
        tracing::info!(
            wire_format = %cfg.encoding.wire_format,
            registered = ?registry.registered(),
            "wire format registry ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, registry }),
        })
    }

    pub fn cfg(&self) -> &ToolConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &WireFormatRegistry {
        &self.inner.registry
    }

    pub fn build_interest(&self, name_uri: &str) -> Interest {
        template::build_interest(&self.inner.cfg.interest, name_uri)
    }

    /// Build and encode an Interest for `name_uri` with the default format.
    /// Returns the Interest with the encoded bytes.
    pub fn encode(&self, name_uri: &str) -> Result<(Interest, Blob)> {
        let interest = self.build_interest(name_uri);
        let wire = interest.wire_encode(Some(self.inner.registry.default_format()))?;
        tracing::debug!(uri = %interest, len = wire.size(), "interest encoded");
        Ok((interest, wire))
    }

    pub fn decode(&self, wire: &[u8]) -> Result<Interest> {
        let mut interest = Interest::default();
        interest.wire_decode(wire, Some(self.inner.registry.default_format()))?;
        Ok(interest)
    }
}
