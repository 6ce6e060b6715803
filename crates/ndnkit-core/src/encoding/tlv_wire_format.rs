//! NDN-TLV 0.1 encoding of Interests.

use bytes::Bytes;
use tracing::trace;

use super::tlv::{tlv_type, TlvDecoder, TlvEncoder};
use super::WireFormat;
use crate::error::{NdnError, Result};
use crate::exclude::{Exclude, ExcludeEntry};
use crate::interest::Interest;
use crate::key_locator::{KeyLocator, KeyLocatorType};
use crate::name::{Component, Name};
use crate::util::Blob;

/// Nonce length generated when an Interest has none.
pub const NONCE_LEN: usize = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct TlvWireFormat;

impl TlvWireFormat {
    pub const NAME: &'static str = "ndn-tlv";
}

impl WireFormat for TlvWireFormat {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn encode_interest(&self, interest: &Interest) -> Result<Blob> {
        let lifetime = match interest.interest_lifetime_milliseconds() {
            None => None,
            Some(ms) if ms.is_finite() && ms >= 0.0 => Some(ms.round() as u64),
            Some(ms) => {
                return Err(NdnError::UnsupportedFormat(format!(
                    "interest lifetime {ms} cannot be encoded"
                )))
            }
        };

        let mut nonce = interest.get_nonce();
        if nonce.is_empty() {
            nonce = Blob::from(rand::random::<[u8; NONCE_LEN]>());
            trace!(nonce = ?nonce, "generated interest nonce");
        }

        let mut encoder = TlvEncoder::new();
        encoder.write_nested(tlv_type::INTEREST, |e| {
            encode_name(e, interest.name());
            if has_selectors(interest) {
                e.write_nested(tlv_type::SELECTORS, |s| encode_selectors(s, interest));
            }
            e.write_blob_tlv(tlv_type::NONCE, nonce.buf());
            e.write_optional_non_negative_integer_tlv(
                tlv_type::SCOPE,
                interest.scope().map(u64::from),
            );
            e.write_optional_non_negative_integer_tlv(tlv_type::INTEREST_LIFETIME, lifetime);
        });
        Ok(Blob::from(encoder.finish()))
    }

    fn decode_interest(&self, interest: &mut Interest, input: &[u8]) -> Result<()> {
        let mut outer = TlvDecoder::new(Bytes::copy_from_slice(input));
        let mut d = outer.read_nested(tlv_type::INTEREST)?;
        outer.finish()?;

        let name = decode_name(&mut d)?;

        let mut min_suffix_components = None;
        let mut max_suffix_components = None;
        let mut key_locator = KeyLocator::new();
        let mut exclude = Exclude::new();
        let mut child_selector = None;
        let mut must_be_fresh = false;
        if d.peek_type() == Some(tlv_type::SELECTORS) {
            let mut s = d.read_nested(tlv_type::SELECTORS)?;
            min_suffix_components = read_optional_u32(&mut s, tlv_type::MIN_SUFFIX_COMPONENTS)?;
            max_suffix_components = read_optional_u32(&mut s, tlv_type::MAX_SUFFIX_COMPONENTS)?;
            if s.peek_type() == Some(tlv_type::PUBLISHER_PUBLIC_KEY_LOCATOR) {
                let mut p = s.read_nested(tlv_type::PUBLISHER_PUBLIC_KEY_LOCATOR)?;
                key_locator = decode_key_locator(&mut p)?;
                p.finish()?;
            }
            if s.peek_type() == Some(tlv_type::EXCLUDE) {
                let mut x = s.read_nested(tlv_type::EXCLUDE)?;
                exclude = decode_exclude(&mut x)?;
            }
            child_selector = read_optional_u32(&mut s, tlv_type::CHILD_SELECTOR)?;
            must_be_fresh = s.read_boolean_tlv(tlv_type::MUST_BE_FRESH)?;
            s.finish()?;
        }

        let nonce = d.read_blob_tlv(tlv_type::NONCE)?;
        let scope = read_optional_u32(&mut d, tlv_type::SCOPE)?;
        let lifetime = d.read_optional_non_negative_integer_tlv(tlv_type::INTEREST_LIFETIME)?;
        d.finish()?;

        interest
            .set_name(name)
            .set_min_suffix_components(min_suffix_components)
            .set_max_suffix_components(max_suffix_components)
            .set_key_locator(key_locator)
            .set_exclude(exclude)
            .set_child_selector(child_selector)
            .set_must_be_fresh(must_be_fresh)
            .set_scope(scope)
            .set_interest_lifetime_milliseconds(lifetime.map(|ms| ms as f64))
            .set_nonce(Blob::from(nonce));
        Ok(())
    }
}

fn has_selectors(interest: &Interest) -> bool {
    interest.min_suffix_components().is_some()
        || interest.max_suffix_components().is_some()
        || interest.key_locator().key_type().is_some()
        || !interest.exclude().is_empty()
        || interest.child_selector().is_some()
        || interest.must_be_fresh()
}

fn encode_selectors(s: &mut TlvEncoder, interest: &Interest) {
    s.write_optional_non_negative_integer_tlv(
        tlv_type::MIN_SUFFIX_COMPONENTS,
        interest.min_suffix_components().map(u64::from),
    );
    s.write_optional_non_negative_integer_tlv(
        tlv_type::MAX_SUFFIX_COMPONENTS,
        interest.max_suffix_components().map(u64::from),
    );
    if interest.key_locator().key_type().is_some() {
        s.write_nested(tlv_type::PUBLISHER_PUBLIC_KEY_LOCATOR, |p| {
            encode_key_locator(p, interest.key_locator());
        });
    }
    if !interest.exclude().is_empty() {
        s.write_nested(tlv_type::EXCLUDE, |x| encode_exclude(x, interest.exclude()));
    }
    s.write_optional_non_negative_integer_tlv(
        tlv_type::CHILD_SELECTOR,
        interest.child_selector().map(u64::from),
    );
    if interest.must_be_fresh() {
        s.write_type_and_length(tlv_type::MUST_BE_FRESH, 0);
    }
}

fn encode_name(e: &mut TlvEncoder, name: &Name) {
    e.write_nested(tlv_type::NAME, |n| {
        for c in name {
            n.write_blob_tlv(tlv_type::NAME_COMPONENT, c.value().buf());
        }
    });
}

fn decode_name(d: &mut TlvDecoder) -> Result<Name> {
    let mut n = d.read_nested(tlv_type::NAME)?;
    let mut name = Name::new();
    while n.remaining() > 0 {
        name.append(Component::new(n.read_blob_tlv(tlv_type::NAME_COMPONENT)?));
    }
    Ok(name)
}

fn encode_key_locator(e: &mut TlvEncoder, key_locator: &KeyLocator) {
    e.write_nested(tlv_type::KEY_LOCATOR, |k| match key_locator.key_type() {
        Some(KeyLocatorType::KeyName) => encode_name(k, key_locator.key_name()),
        Some(KeyLocatorType::KeyLocatorDigest) => {
            k.write_blob_tlv(tlv_type::KEY_LOCATOR_DIGEST, key_locator.key_data().buf())
        }
        None => {}
    });
}

fn decode_key_locator(d: &mut TlvDecoder) -> Result<KeyLocator> {
    let mut k = d.read_nested(tlv_type::KEY_LOCATOR)?;
    let key_locator = match k.peek_type() {
        Some(tlv_type::NAME) => KeyLocator::with_key_name(decode_name(&mut k)?),
        Some(tlv_type::KEY_LOCATOR_DIGEST) => {
            KeyLocator::with_digest(k.read_blob_tlv(tlv_type::KEY_LOCATOR_DIGEST)?)
        }
        Some(other) => {
            return Err(NdnError::Decoding(format!(
                "unrecognized key locator tlv type {other}"
            )))
        }
        None => KeyLocator::new(),
    };
    k.finish()?;
    Ok(key_locator)
}

fn encode_exclude(e: &mut TlvEncoder, exclude: &Exclude) {
    for entry in exclude.iter() {
        match entry {
            ExcludeEntry::Any => e.write_type_and_length(tlv_type::ANY, 0),
            ExcludeEntry::Component(c) => {
                e.write_blob_tlv(tlv_type::NAME_COMPONENT, c.value().buf())
            }
        }
    }
}

fn decode_exclude(d: &mut TlvDecoder) -> Result<Exclude> {
    let mut exclude = Exclude::new();
    while d.remaining() > 0 {
        if d.read_boolean_tlv(tlv_type::ANY)? {
            exclude.append_any();
        } else {
            exclude.append_component(Component::new(d.read_blob_tlv(tlv_type::NAME_COMPONENT)?));
        }
    }
    Ok(exclude)
}

fn read_optional_u32(d: &mut TlvDecoder, expected: u64) -> Result<Option<u32>> {
    d.read_optional_non_negative_integer_tlv(expected)?
        .map(|v| {
            u32::try_from(v)
                .map_err(|_| NdnError::Decoding(format!("tlv type {expected} value {v} out of range")))
        })
        .transpose()
}
