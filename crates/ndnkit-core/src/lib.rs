//! ndnkit core: the client-side Interest packet model and its wire codec.
//!
//! This crate defines the mutable Interest aggregate, the change-tracking
//! machinery that decides when a cached nonce is stale, the name / key locator
//! / exclude sub-objects, and the pluggable `WireFormat` seam with the default
//! NDN-TLV implementation. It performs no I/O and carries no runtime
//! dependencies so it can be embedded in any transport.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed wire input surfaces as `NdnError::Decoding`, never as a panic.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod encoding;
pub mod error;
pub mod exclude;
pub mod interest;
pub mod key_locator;
pub mod name;
pub mod util;

/// Shared result type.
pub use error::{NdnError, Result};

pub use encoding::{TlvWireFormat, WireFormat, WireFormatRegistry};
pub use exclude::{Exclude, ExcludeEntry};
pub use interest::Interest;
pub use key_locator::{KeyLocator, KeyLocatorType};
pub use name::{Component, Name};
pub use util::{Blob, ChangeCount, ChangeCounter};
