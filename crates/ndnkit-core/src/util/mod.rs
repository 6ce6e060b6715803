//! Value types shared by the packet model.

pub mod blob;
pub mod change_counter;

pub use blob::Blob;
pub use change_counter::{next_stamp, ChangeCount, ChangeCounter};
