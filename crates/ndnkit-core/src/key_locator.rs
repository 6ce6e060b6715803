//! Key locator: a hint naming the key expected to sign the response.

use std::cell::Cell;

use crate::name::Name;
use crate::util::{next_stamp, Blob, ChangeCount, ChangeCounter};

/// What the key locator carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLocatorType {
    /// `key_name` identifies the key.
    KeyName,
    /// `key_data` holds a digest of the key.
    KeyLocatorDigest,
}

/// Key locator. `key_type() == None` means "not specified".
///
/// The nested key name is tracked the same way the Interest tracks its own
/// sub-objects, so mutating it through `key_name_mut()` moves this locator's
/// change count on the next poll.
#[derive(Debug, Clone)]
pub struct KeyLocator {
    key_type: Option<KeyLocatorType>,
    key_data: Blob,
    key_name: ChangeCounter<Name>,
    change_count: Cell<u64>,
}

impl KeyLocator {
    pub fn new() -> Self {
        Self {
            key_type: None,
            key_data: Blob::new(),
            key_name: ChangeCounter::new(Name::new()),
            change_count: Cell::new(next_stamp()),
        }
    }

    /// Locator of type `KeyName`.
    pub fn with_key_name(name: impl Into<Name>) -> Self {
        let mut locator = Self::new();
        locator.set_key_type(Some(KeyLocatorType::KeyName));
        locator.set_key_name(name);
        locator
    }

    /// Locator of type `KeyLocatorDigest`.
    pub fn with_digest(digest: impl Into<Blob>) -> Self {
        let mut locator = Self::new();
        locator.set_key_type(Some(KeyLocatorType::KeyLocatorDigest));
        locator.set_key_data(digest);
        locator
    }

    pub fn key_type(&self) -> Option<KeyLocatorType> {
        self.key_type
    }

    pub fn key_data(&self) -> &Blob {
        &self.key_data
    }

    pub fn key_name(&self) -> &Name {
        self.key_name.get()
    }

    pub fn key_name_mut(&mut self) -> &mut Name {
        self.key_name.get_mut()
    }

    pub fn set_key_type(&mut self, key_type: Option<KeyLocatorType>) {
        self.key_type = key_type;
        self.bump();
    }

    pub fn set_key_data(&mut self, key_data: impl Into<Blob>) {
        self.key_data = key_data.into();
        self.bump();
    }

    pub fn set_key_name(&mut self, name: impl Into<Name>) {
        self.key_name.set(name.into());
        // Counted here; consume the nested edge so the next poll does not
        // count it again.
        self.key_name.check_changed();
        self.bump();
    }

    /// Reset to the unspecified state.
    pub fn clear(&mut self) {
        self.key_type = None;
        self.key_data = Blob::new();
        self.key_name.set(Name::new());
        self.key_name.check_changed();
        self.bump();
    }

    /// Same type, data and key name.
    pub fn same_content(&self, other: &KeyLocator) -> bool {
        self.key_type == other.key_type
            && self.key_data == other.key_data
            && self.key_name() == other.key_name()
    }

    fn bump(&mut self) {
        self.change_count.set(next_stamp());
    }
}

impl Default for KeyLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeCount for KeyLocator {
    fn change_count(&self) -> u64 {
        if self.key_name.check_changed() {
            self.change_count.set(next_stamp());
        }
        self.change_count.get()
    }
}
