//! Dialogue - short antagonist lines keyed by whale and moment.

mod registry;
mod selector;

pub use registry::*;
pub use selector::*;
