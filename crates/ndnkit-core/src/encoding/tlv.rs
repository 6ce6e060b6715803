//! NDN-TLV primitives (panic-free).
//!
//! Parsing rules:
//! - Never index into the input; use `Buf` and `remaining()` checks.
//! - Every length read from the wire is checked against what is left before
//!   any bytes are consumed.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{NdnError, Result};

/// TLV type numbers used by the Interest packet.
pub mod tlv_type {
    pub const INTEREST: u64 = 5;
    pub const NAME: u64 = 7;
    pub const NAME_COMPONENT: u64 = 8;
    pub const SELECTORS: u64 = 9;
    pub const NONCE: u64 = 10;
    pub const SCOPE: u64 = 11;
    pub const INTEREST_LIFETIME: u64 = 12;
    pub const MIN_SUFFIX_COMPONENTS: u64 = 13;
    pub const MAX_SUFFIX_COMPONENTS: u64 = 14;
    pub const PUBLISHER_PUBLIC_KEY_LOCATOR: u64 = 15;
    pub const EXCLUDE: u64 = 16;
    pub const CHILD_SELECTOR: u64 = 17;
    pub const MUST_BE_FRESH: u64 = 18;
    pub const ANY: u64 = 19;
    pub const KEY_LOCATOR: u64 = 28;
    pub const KEY_LOCATOR_DIGEST: u64 = 29;
}

/// Forward TLV writer.
#[derive(Debug, Default)]
pub struct TlvEncoder {
    buf: BytesMut,
}

impl TlvEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// VAR-NUMBER: 1, 3, 5 or 9 bytes.
    pub fn write_var_number(&mut self, v: u64) {
        if v < 253 {
            self.buf.put_u8(v as u8);
        } else if v <= u64::from(u16::MAX) {
            self.buf.put_u8(253);
            self.buf.put_u16(v as u16);
        } else if v <= u64::from(u32::MAX) {
            self.buf.put_u8(254);
            self.buf.put_u32(v as u32);
        } else {
            self.buf.put_u8(255);
            self.buf.put_u64(v);
        }
    }

    pub fn write_type_and_length(&mut self, tlv_type: u64, len: usize) {
        self.write_var_number(tlv_type);
        self.write_var_number(len as u64);
    }

    pub fn write_blob_tlv(&mut self, tlv_type: u64, value: &[u8]) {
        self.write_type_and_length(tlv_type, value.len());
        self.buf.put_slice(value);
    }

    /// NonNegativeInteger in the shortest of 1, 2, 4 or 8 bytes.
    pub fn write_non_negative_integer_tlv(&mut self, tlv_type: u64, v: u64) {
        if v <= u64::from(u8::MAX) {
            self.write_type_and_length(tlv_type, 1);
            self.buf.put_u8(v as u8);
        } else if v <= u64::from(u16::MAX) {
            self.write_type_and_length(tlv_type, 2);
            self.buf.put_u16(v as u16);
        } else if v <= u64::from(u32::MAX) {
            self.write_type_and_length(tlv_type, 4);
            self.buf.put_u32(v as u32);
        } else {
            self.write_type_and_length(tlv_type, 8);
            self.buf.put_u64(v);
        }
    }

    pub fn write_optional_non_negative_integer_tlv(&mut self, tlv_type: u64, v: Option<u64>) {
        if let Some(v) = v {
            self.write_non_negative_integer_tlv(tlv_type, v);
        }
    }

    /// Write `tlv_type` wrapping whatever `f` writes.
    pub fn write_nested(&mut self, tlv_type: u64, f: impl FnOnce(&mut TlvEncoder)) {
        let mut inner = TlvEncoder::new();
        f(&mut inner);
        self.write_blob_tlv(tlv_type, &inner.buf);
    }

    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// TLV reader over one TLV-VALUE (or a whole input buffer).
#[derive(Debug, Clone)]
pub struct TlvDecoder {
    buf: Bytes,
}

impl TlvDecoder {
    pub fn new(buf: Bytes) -> Self {
        Self { buf }
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn read_var_number(&mut self) -> Result<u64> {
        if self.buf.remaining() < 1 {
            return Err(truncated("var-number"));
        }
        let first = self.buf.get_u8();
        let width = match first {
            253 => 2,
            254 => 4,
            255 => 8,
            v => return Ok(u64::from(v)),
        };
        if self.buf.remaining() < width {
            return Err(truncated("var-number"));
        }
        Ok(match width {
            2 => u64::from(self.buf.get_u16()),
            4 => u64::from(self.buf.get_u32()),
            _ => self.buf.get_u64(),
        })
    }

    /// Type of the next TLV, without consuming it.
    pub fn peek_type(&self) -> Option<u64> {
        let mut probe = self.clone();
        probe.read_var_number().ok()
    }

    /// Read a TLV header of `expected` type and return its length, checked
    /// against the remaining input.
    pub fn read_type_and_length(&mut self, expected: u64) -> Result<usize> {
        let tlv_type = self.read_var_number()?;
        if tlv_type != expected {
            return Err(NdnError::Decoding(format!(
                "expected tlv type {expected}, got {tlv_type}"
            )));
        }
        let len = self.read_var_number()?;
        let len = usize::try_from(len)
            .map_err(|_| NdnError::Decoding(format!("tlv length {len} too large")))?;
        if self.buf.remaining() < len {
            return Err(NdnError::Decoding(format!(
                "tlv type {expected} length {len} exceeds remaining {}",
                self.buf.remaining()
            )));
        }
        Ok(len)
    }

    /// Decoder over the value of the next TLV of `expected` type.
    pub fn read_nested(&mut self, expected: u64) -> Result<TlvDecoder> {
        let len = self.read_type_and_length(expected)?;
        Ok(TlvDecoder::new(self.buf.copy_to_bytes(len)))
    }

    pub fn read_blob_tlv(&mut self, expected: u64) -> Result<Bytes> {
        let len = self.read_type_and_length(expected)?;
        Ok(self.buf.copy_to_bytes(len))
    }

    pub fn read_optional_blob_tlv(&mut self, expected: u64) -> Result<Option<Bytes>> {
        if self.peek_type() != Some(expected) {
            return Ok(None);
        }
        self.read_blob_tlv(expected).map(Some)
    }

    pub fn read_non_negative_integer_tlv(&mut self, expected: u64) -> Result<u64> {
        let len = self.read_type_and_length(expected)?;
        Ok(match len {
            1 => u64::from(self.buf.get_u8()),
            2 => u64::from(self.buf.get_u16()),
            4 => u64::from(self.buf.get_u32()),
            8 => self.buf.get_u64(),
            other => {
                return Err(NdnError::Decoding(format!(
                    "invalid non-negative integer length {other} for tlv type {expected}"
                )))
            }
        })
    }

    pub fn read_optional_non_negative_integer_tlv(&mut self, expected: u64) -> Result<Option<u64>> {
        if self.peek_type() != Some(expected) {
            return Ok(None);
        }
        self.read_non_negative_integer_tlv(expected).map(Some)
    }

    /// Presence flag: true if an empty TLV of `expected` type comes next.
    pub fn read_boolean_tlv(&mut self, expected: u64) -> Result<bool> {
        if self.peek_type() != Some(expected) {
            return Ok(false);
        }
        let len = self.read_type_and_length(expected)?;
        if len != 0 {
            return Err(NdnError::Decoding(format!(
                "tlv type {expected} must be empty, got length {len}"
            )));
        }
        Ok(true)
    }

    /// Fail if anything is left unread.
    pub fn finish(&self) -> Result<()> {
        if self.buf.has_remaining() {
            return Err(NdnError::Decoding(format!(
                "{} unexpected trailing bytes",
                self.buf.remaining()
            )));
        }
        Ok(())
    }
}

fn truncated(what: &str) -> NdnError {
    NdnError::Decoding(format!("input truncated while reading {what}"))
}
