//! Shared error type across ndnkit crates.

use thiserror::Error;

/// Stable error codes (used by test vectors and tool output).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The requested wire format cannot handle the packet.
    UnsupportedFormat,
    /// Malformed, truncated or ambiguous wire input.
    DecodingError,
    /// Configuration rejected by validation.
    InvalidConfig,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in vectors and tool output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorCode::DecodingError => "DECODING_ERROR",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, NdnError>;

/// Unified error type used by core and tool.
#[derive(Debug, Error)]
pub enum NdnError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("decoding error: {0}")]
    Decoding(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl NdnError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            NdnError::UnsupportedFormat(_) => ErrorCode::UnsupportedFormat,
            NdnError::Decoding(_) => ErrorCode::DecodingError,
            NdnError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            NdnError::Internal(_) => ErrorCode::Internal,
        }
    }
}
