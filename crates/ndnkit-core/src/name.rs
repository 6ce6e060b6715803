//! Hierarchical NDN names.
//!
//! URI form follows the NDN URI scheme: `/`-separated components, each
//! percent-escaped. A component made only of periods is written with three
//! extra periods so that `...` denotes the empty component and `.` / `..`
//! stay reserved.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::util::{next_stamp, Blob, ChangeCount};

/// One name component (opaque bytes).
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Component(Blob);

impl Component {
    pub fn new(value: impl Into<Blob>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &Blob {
        &self.0
    }

    /// Escaped URI form of this component.
    pub fn to_escaped_string(&self) -> String {
        Name::to_escaped_string(self.0.buf())
    }

    /// Parse one escaped URI component. Returns `None` for the reserved
    /// values `.` and `..` (and the empty string).
    pub fn from_escaped_string(escaped: &str) -> Option<Self> {
        let value = unescape(escaped.trim());
        if value.iter().all(|b| *b == b'.') {
            if value.len() <= 2 {
                return None;
            }
            return Some(Self(Blob::copy_from_slice(&value[3..])));
        }
        Some(Self(Blob::from(value)))
    }
}

/// Canonical order: shorter components first, then bytewise.
impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .size()
            .cmp(&other.0.size())
            .then_with(|| self.0.buf().cmp(other.0.buf()))
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for Component {
    fn from(s: &str) -> Self {
        Self(Blob::copy_from_slice(s.as_bytes()))
    }
}

impl From<&[u8]> for Component {
    fn from(b: &[u8]) -> Self {
        Self(Blob::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Component {
    fn from(v: Vec<u8>) -> Self {
        Self(Blob::from(v))
    }
}

impl From<Blob> for Component {
    fn from(b: Blob) -> Self {
        Self(b)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Component({})", self.to_escaped_string())
    }
}

/// Ordered list of components with its own mutation stamp.
#[derive(Clone)]
pub struct Name {
    components: Vec<Component>,
    change_count: u64,
}

impl Name {
    /// The empty name (`/`).
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
            change_count: next_stamp(),
        }
    }

    /// Parse an NDN URI such as `/a/b`, `ndn:/a/b` or `ndn://authority/a/b`.
    pub fn from_uri(uri: &str) -> Self {
        let mut name = Self::new();
        name.set(uri);
        name
    }

    /// Replace all components with those parsed from `uri`.
    pub fn set(&mut self, uri: &str) {
        self.clear();

        let mut uri = uri.trim();
        if uri.is_empty() {
            return;
        }

        // Strip the scheme, unless the colon is inside a component.
        if let Some(colon) = uri.find(':') {
            match uri.find('/') {
                Some(slash) if slash < colon => {}
                _ => uri = uri[colon + 1..].trim(),
            }
        }

        if let Some(rest) = uri.strip_prefix("//") {
            match rest.find('/') {
                Some(end) => uri = rest[end + 1..].trim(),
                // Only an authority, no components.
                None => return,
            }
        } else if let Some(rest) = uri.strip_prefix('/') {
            uri = rest;
        }

        for part in uri.split('/') {
            if let Some(component) = Component::from_escaped_string(part) {
                self.append(component);
            }
        }
    }

    pub fn append(&mut self, component: impl Into<Component>) -> &mut Self {
        self.components.push(component.into());
        self.change_count = next_stamp();
        self
    }

    pub fn clear(&mut self) {
        self.components.clear();
        self.change_count = next_stamp();
    }

    pub fn get(&self, i: usize) -> Option<&Component> {
        self.components.get(i)
    }

    /// Number of components. Zero means the name is not specified.
    pub fn size(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// New name made of the first `n` components (all of them if `n` is
    /// larger than the name).
    pub fn get_prefix(&self, n: usize) -> Name {
        let mut prefix = Name::new();
        for c in self.components.iter().take(n) {
            prefix.append(c.clone());
        }
        prefix
    }

    /// True if every component of `self` matches the start of `other`.
    pub fn is_prefix_of(&self, other: &Name) -> bool {
        self.size() <= other.size()
            && self
                .components
                .iter()
                .zip(other.components.iter())
                .all(|(a, b)| a == b)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.components.iter()
    }

    /// Canonical URI, `/` for the empty name.
    pub fn to_uri(&self) -> String {
        if self.components.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for c in &self.components {
            out.push('/');
            out.push_str(&c.to_escaped_string());
        }
        out
    }

    /// Percent-escape raw bytes for use in a URI.
    pub fn to_escaped_string(value: &[u8]) -> String {
        let mut out = String::with_capacity(value.len());
        if value.iter().all(|b| *b == b'.') {
            out.push_str("...");
            out.extend(std::iter::repeat('.').take(value.len()));
            return out;
        }
        for &b in value {
            if b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.' | b'_') {
                out.push(b as char);
            } else {
                out.push_str(&format!("%{b:02X}"));
            }
        }
        out
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeCount for Name {
    fn change_count(&self) -> u64 {
        self.change_count
    }
}

/// Names compare by components; the mutation counter is bookkeeping.
impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components.hash(state);
    }
}

impl From<&str> for Name {
    fn from(uri: &str) -> Self {
        Name::from_uri(uri)
    }
}

impl From<String> for Name {
    fn from(uri: String) -> Self {
        Name::from_uri(&uri)
    }
}

impl<'a> IntoIterator for &'a Name {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.to_uri())
    }
}

fn unescape(s: &str) -> Vec<u8> {
    let mut rest = s.as_bytes();
    let mut out = Vec::with_capacity(rest.len());
    while let Some((&b, tail)) = rest.split_first() {
        // Malformed escapes are kept literally.
        if let [b'%', hi, lo, after @ ..] = rest {
            if let (Some(hi), Some(lo)) = (hex_val(*hi), hex_val(*lo)) {
                out.push(hi << 4 | lo);
                rest = after;
                continue;
            }
        }
        out.push(b);
        rest = tail;
    }
    out
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
