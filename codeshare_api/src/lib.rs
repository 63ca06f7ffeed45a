//! Shared Codeshare data models consumed by the core library and snippet stores.

pub mod link;
pub mod share;
pub mod workspace;

pub use link::*;
pub use share::*;
pub use workspace::*;
