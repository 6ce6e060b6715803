//! Immutable byte buffer.
//!
//! `Blob` wraps `bytes::Bytes`, so cloning never copies the payload. A blob is
//! either built by copying a borrowed slice (`copy_from_slice`) or by taking
//! ownership of a buffer the caller already owns (`From<Vec<u8>>`,
//! `From<Bytes>`), which does not copy.

use std::fmt;

use bytes::Bytes;

/// Immutable, cheaply clonable byte sequence with value equality.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Blob(Bytes);

impl Blob {
    /// The empty blob.
    pub fn new() -> Self {
        Self(Bytes::new())
    }

    /// Copy `buf` into a new blob.
    pub fn copy_from_slice(buf: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(buf))
    }

    /// Number of bytes. Zero means "not specified" for optional payloads.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw bytes.
    pub fn buf(&self) -> &[u8] {
        &self.0
    }

    /// Shared handle to the underlying buffer (no copy).
    pub fn to_bytes(&self) -> Bytes {
        self.0.clone()
    }
}

impl From<Vec<u8>> for Blob {
    fn from(v: Vec<u8>) -> Self {
        Self(Bytes::from(v))
    }
}

impl From<Bytes> for Blob {
    fn from(b: Bytes) -> Self {
        Self(b)
    }
}

impl From<&[u8]> for Blob {
    fn from(b: &[u8]) -> Self {
        Self::copy_from_slice(b)
    }
}

impl<const N: usize> From<[u8; N]> for Blob {
    fn from(b: [u8; N]) -> Self {
        Self(Bytes::copy_from_slice(&b))
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blob(")?;
        for b in self.0.iter() {
            write!(f, "{b:02x}")?;
        }
        write!(f, ")")
    }
}
