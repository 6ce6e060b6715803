//! Top-level facade crate for ndnkit.
//!
//! Re-exports the packet model and the tool library so users can depend on a
//! single crate.

pub mod core {
    pub use ndnkit_core::*;
}

pub mod tool {
    pub use ndnkit_tool::*;
}

pub use ndnkit_core::{Interest, Name, NdnError, Result};
