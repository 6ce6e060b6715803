//! Exclusion filter selector.
//!
//! An ordered list of components and `Any` markers. `Any` excludes the open
//! range between its neighbouring components (or to the end of the
//! component space when it has no neighbour on that side).

use std::fmt;

use crate::name::{Component, Name};
use crate::util::{next_stamp, ChangeCount};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExcludeEntry {
    Any,
    Component(Component),
}

#[derive(Clone)]
pub struct Exclude {
    entries: Vec<ExcludeEntry>,
    change_count: u64,
}

impl Exclude {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            change_count: next_stamp(),
        }
    }

    pub fn append_any(&mut self) -> &mut Self {
        self.entries.push(ExcludeEntry::Any);
        self.change_count = next_stamp();
        self
    }

    pub fn append_component(&mut self, component: impl Into<Component>) -> &mut Self {
        self.entries.push(ExcludeEntry::Component(component.into()));
        self.change_count = next_stamp();
        self
    }

    pub fn get(&self, i: usize) -> Option<&ExcludeEntry> {
        self.entries.get(i)
    }

    /// Number of entries. Zero means the filter is not specified.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.change_count = next_stamp();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExcludeEntry> {
        self.entries.iter()
    }

    /// True if `component` is excluded by this filter.
    pub fn matches(&self, component: &Component) -> bool {
        for (i, entry) in self.entries.iter().enumerate() {
            match entry {
                ExcludeEntry::Component(c) => {
                    if c == component {
                        return true;
                    }
                }
                ExcludeEntry::Any => {
                    let lower = i
                        .checked_sub(1)
                        .and_then(|j| self.entries.get(j))
                        .and_then(as_component);
                    let upper = self.entries.get(i + 1).and_then(as_component);
                    let above = lower.map_or(true, |l| component > l);
                    let below = upper.map_or(true, |u| component < u);
                    if above && below {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Comma separated entries, `*` for `Any`.
    pub fn to_uri(&self) -> String {
        self.entries
            .iter()
            .map(|e| match e {
                ExcludeEntry::Any => "*".to_string(),
                ExcludeEntry::Component(c) => Name::to_escaped_string(c.value().buf()),
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn as_component(entry: &ExcludeEntry) -> Option<&Component> {
    match entry {
        ExcludeEntry::Component(c) => Some(c),
        ExcludeEntry::Any => None,
    }
}

impl Default for Exclude {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeCount for Exclude {
    fn change_count(&self) -> u64 {
        self.change_count
    }
}

impl PartialEq for Exclude {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Exclude {}

impl fmt::Debug for Exclude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exclude({})", self.to_uri())
    }
}
