//! The Interest packet.
//!
//! An `Interest` is a plain mutable record whose one derived field, the
//! nonce, is only meaningful for the exact content it was set (or decoded)
//! with. Every setter bumps an aggregate change count; direct mutation of the
//! name, key locator or exclude through the `*_mut()` accessors is picked up
//! lazily the next time the count is recomputed. `get_nonce()` compares the
//! count against the one recorded when the nonce was last observed and hands
//! back an empty nonce once anything moved.
//!
//! Polling state lives in `Cell`/`RefCell`, so reads such as `get_nonce()`
//! and `to_uri()` take `&self`. The type is therefore not `Sync`: one
//! Interest must not be shared between threads without external locking.

use std::cell::{Cell, RefCell};
use std::fmt;

use tracing::{debug, trace};

use crate::encoding::{default_wire_format, WireFormat};
use crate::error::Result;
use crate::exclude::Exclude;
use crate::key_locator::KeyLocator;
use crate::name::Name;
use crate::util::{Blob, ChangeCount, ChangeCounter};

#[derive(Debug, Clone, Default)]
pub struct Interest {
    name: ChangeCounter<Name>,
    min_suffix_components: Option<u32>,
    max_suffix_components: Option<u32>,
    key_locator: ChangeCounter<KeyLocator>,
    exclude: ChangeCounter<Exclude>,
    child_selector: Option<u32>,
    must_be_fresh: bool,
    nonce: RefCell<Blob>,
    /// Change count at the time the nonce was last set or read.
    nonce_observed_at: Cell<u64>,
    scope: Option<u32>,
    interest_lifetime_milliseconds: Option<f64>,
    change_count: Cell<u64>,
}

impl Interest {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: ChangeCounter::new(name.into()),
            ..Self::default()
        }
    }

    /// The name. `size() == 0` if not specified.
    pub fn name(&self) -> &Name {
        self.name.get()
    }

    /// Direct access to the name. Changes invalidate the nonce on the next
    /// poll.
    pub fn name_mut(&mut self) -> &mut Name {
        self.name.get_mut()
    }

    pub fn min_suffix_components(&self) -> Option<u32> {
        self.min_suffix_components
    }

    pub fn max_suffix_components(&self) -> Option<u32> {
        self.max_suffix_components
    }

    /// The key locator. `key_type() == None` if not specified.
    pub fn key_locator(&self) -> &KeyLocator {
        self.key_locator.get()
    }

    pub fn key_locator_mut(&mut self) -> &mut KeyLocator {
        self.key_locator.get_mut()
    }

    /// The exclude filter. `size() == 0` if not specified.
    pub fn exclude(&self) -> &Exclude {
        self.exclude.get()
    }

    pub fn exclude_mut(&mut self) -> &mut Exclude {
        self.exclude.get_mut()
    }

    pub fn child_selector(&self) -> Option<u32> {
        self.child_selector
    }

    pub fn must_be_fresh(&self) -> bool {
        self.must_be_fresh
    }

    pub fn scope(&self) -> Option<u32> {
        self.scope
    }

    pub fn interest_lifetime_milliseconds(&self) -> Option<f64> {
        self.interest_lifetime_milliseconds
    }

    /// The nonce, or an empty blob if any field changed since the nonce was
    /// set or last read.
    pub fn get_nonce(&self) -> Blob {
        let current = self.get_change_count();
        if self.nonce_observed_at.get() != current {
            let mut nonce = self.nonce.borrow_mut();
            if !nonce.is_empty() {
                debug!(
                    observed_at = self.nonce_observed_at.get(),
                    change_count = current,
                    "interest changed, nonce invalidated"
                );
            }
            *nonce = Blob::new();
            self.nonce_observed_at.set(current);
        }
        self.nonce.borrow().clone()
    }

    /// Change count, incremented each time this Interest or one of its
    /// sub-objects changes.
    pub fn get_change_count(&self) -> u64 {
        // Poll every wrapper so each snapshot is refreshed.
        let name_changed = self.name.check_changed();
        let key_locator_changed = self.key_locator.check_changed();
        let exclude_changed = self.exclude.check_changed();

        if name_changed || key_locator_changed || exclude_changed {
            trace!(
                name_changed,
                key_locator_changed,
                exclude_changed,
                "interest sub-object changed"
            );
            self.bump();
        }
        self.change_count.get()
    }

    pub fn set_name(&mut self, name: impl Into<Name>) -> &mut Self {
        self.name.set(name.into());
        self.bump();
        self
    }

    pub fn set_min_suffix_components(&mut self, value: Option<u32>) -> &mut Self {
        self.min_suffix_components = value;
        self.bump();
        self
    }

    pub fn set_max_suffix_components(&mut self, value: Option<u32>) -> &mut Self {
        self.max_suffix_components = value;
        self.bump();
        self
    }

    /// Replace the whole key locator.
    pub fn set_key_locator(&mut self, key_locator: KeyLocator) -> &mut Self {
        self.key_locator.set(key_locator);
        self.bump();
        self
    }

    /// Replace the whole exclude filter.
    pub fn set_exclude(&mut self, exclude: Exclude) -> &mut Self {
        self.exclude.set(exclude);
        self.bump();
        self
    }

    pub fn set_child_selector(&mut self, value: Option<u32>) -> &mut Self {
        self.child_selector = value;
        self.bump();
        self
    }

    pub fn set_must_be_fresh(&mut self, value: bool) -> &mut Self {
        self.must_be_fresh = value;
        self.bump();
        self
    }

    /// Set the nonce. It stays valid until the next change to this Interest.
    pub fn set_nonce(&mut self, nonce: impl Into<Blob>) -> &mut Self {
        *self.nonce.get_mut() = nonce.into();
        self.bump();
        let current = self.get_change_count();
        self.nonce_observed_at.set(current);
        self
    }

    pub fn set_scope(&mut self, value: Option<u32>) -> &mut Self {
        self.scope = value;
        self.bump();
        self
    }

    pub fn set_interest_lifetime_milliseconds(&mut self, value: Option<f64>) -> &mut Self {
        self.interest_lifetime_milliseconds = value;
        self.bump();
        self
    }

    /// Encode with `wire_format`, or the default NDN-TLV format if `None`.
    pub fn wire_encode(&self, wire_format: Option<&dyn WireFormat>) -> Result<Blob> {
        let wire_format = match wire_format {
            Some(wire_format) => wire_format,
            None => default_wire_format(),
        };
        wire_format.encode_interest(self)
    }

    /// Decode `input` with `wire_format` (default NDN-TLV) and overwrite this
    /// Interest. On error nothing is modified.
    pub fn wire_decode(&mut self, input: &[u8], wire_format: Option<&dyn WireFormat>) -> Result<()> {
        let wire_format = match wire_format {
            Some(wire_format) => wire_format,
            None => default_wire_format(),
        };

        let mut staged = Interest::default();
        if let Err(e) = wire_format.decode_interest(&mut staged, input) {
            debug!(format = wire_format.name(), len = input.len(), error = %e, "interest decode failed");
            return Err(e);
        }
        self.assign(staged);
        Ok(())
    }

    /// NDN URI with selectors as a query string, e.g.
    /// `/test/name?ndn.ChildSelector=1`.
    pub fn to_uri(&self) -> String {
        let mut selectors = Vec::new();
        if let Some(v) = self.min_suffix_components {
            selectors.push(format!("ndn.MinSuffixComponents={v}"));
        }
        if let Some(v) = self.max_suffix_components {
            selectors.push(format!("ndn.MaxSuffixComponents={v}"));
        }
        if let Some(v) = self.child_selector {
            selectors.push(format!("ndn.ChildSelector={v}"));
        }
        if self.must_be_fresh {
            selectors.push("ndn.MustBeFresh=true".to_string());
        }
        if let Some(v) = self.scope {
            selectors.push(format!("ndn.Scope={v}"));
        }
        if let Some(v) = self.interest_lifetime_milliseconds {
            selectors.push(format!("ndn.InterestLifetime={}", lifetime_to_string(v)));
        }
        let nonce = self.get_nonce();
        if !nonce.is_empty() {
            selectors.push(format!("ndn.Nonce={}", Name::to_escaped_string(nonce.buf())));
        }
        if !self.exclude().is_empty() {
            selectors.push(format!("ndn.Exclude={}", self.exclude().to_uri()));
        }

        let mut uri = self.name().to_uri();
        if !selectors.is_empty() {
            uri.push('?');
            uri.push_str(&selectors.join("&"));
        }
        uri
    }

    /// Field-by-field equality, ignoring change tracking state. Compares the
    /// currently valid nonces.
    pub fn same_content(&self, other: &Interest) -> bool {
        self.name() == other.name()
            && self.min_suffix_components == other.min_suffix_components
            && self.max_suffix_components == other.max_suffix_components
            && self.key_locator().same_content(other.key_locator())
            && self.exclude() == other.exclude()
            && self.child_selector == other.child_selector
            && self.must_be_fresh == other.must_be_fresh
            && self.get_nonce() == other.get_nonce()
            && self.scope == other.scope
            && self.interest_lifetime_milliseconds == other.interest_lifetime_milliseconds
    }

    /// Commit a fully decoded Interest through the setters, nonce last so it
    /// stays valid.
    fn assign(&mut self, decoded: Interest) {
        let nonce = decoded.get_nonce();
        let Interest {
            name,
            min_suffix_components,
            max_suffix_components,
            key_locator,
            exclude,
            child_selector,
            must_be_fresh,
            scope,
            interest_lifetime_milliseconds,
            ..
        } = decoded;

        self.set_name(name.into_inner())
            .set_min_suffix_components(min_suffix_components)
            .set_max_suffix_components(max_suffix_components)
            .set_key_locator(key_locator.into_inner())
            .set_exclude(exclude.into_inner())
            .set_child_selector(child_selector)
            .set_must_be_fresh(must_be_fresh)
            .set_scope(scope)
            .set_interest_lifetime_milliseconds(interest_lifetime_milliseconds)
            .set_nonce(nonce);
    }

    fn bump(&self) {
        self.change_count.set(self.change_count.get() + 1);
    }
}

/// Float text with a fractional part for integral values (`4000.0`) and a
/// signed, two-digit exponent outside `[1e-4, 1e16)` (`1e+16`, `1.5e-05`).
fn lifetime_to_string(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    // Debug switches to exponent form at the same bounds, but writes `1e16`.
    let text = format!("{v:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

impl ChangeCount for Interest {
    fn change_count(&self) -> u64 {
        self.get_change_count()
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}
