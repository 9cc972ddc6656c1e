//! # Narrative Core (The Newsroom)
//!
//! Everything the player reads about a run. This crate reads and mutates the
//! `market_rules` state but never decides market outcomes.
//!
//! ## Core Components
//!
//! - **news**: Daily news items from events, whale moves and era shifts
//! - **story**: Trigger-gated scenes, their context and one-shot effects
//! - **dialogue**: Per-whale lines queued for the UI
//! - **director**: Runs all of the above for a day tick or trigger point
//!
//! ## Design Philosophy
//!
//! - **Data-Driven**: Scenes and dialogue ship as TOML and are validated on load
//! - **Injected Effects**: Randomness and time come in through `ports`
//! - **Bounded**: Every queue the UI reads has a fixed capacity

pub mod config;
pub mod dialogue;
pub mod director;
pub mod error;
pub mod news;
pub mod ports;
pub mod story;

pub use config::*;
pub use dialogue::*;
pub use director::*;
pub use error::*;
pub use news::*;
pub use ports::*;
pub use story::*;
