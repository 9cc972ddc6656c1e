//! # Market Rules
//!
//! The "Market Bible" crate - contains the run state, market entities, whale and
//! era definitions, and the plain feed records the UI consumes.
//! This crate is the single source of truth for game state and does not contain any
//! narrative logic.

pub mod catalog;
pub mod entities;
pub mod feed;
pub mod game_state;
pub mod mechanics;
pub mod queue;

pub use catalog::*;
pub use entities::*;
pub use feed::*;
pub use game_state::*;
pub use mechanics::*;
pub use queue::*;
