//! ndnkit tool library entry.
//!
//! Loads the tool config, builds the wire format registry from it, and turns
//! names into Interests carrying the configured selector defaults. Consumed
//! by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod template;
