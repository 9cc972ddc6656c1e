//! Story - narrative scenes gated by trigger points and run conditions.
//!
//! A trigger evaluation works as follows:
//! 1. **Context**: Project the run state into a fresh `StoryContext`
//! 2. **Matching**: Ask the scene matcher for scenes applicable at the trigger
//! 3. **Seen tracking**: Record one-shot scenes so they never return this run
//! 4. **Rendering**: Turn scenes into timestamped `SceneEvent`s for the UI
//! 5. **Effects**: Apply the guarded state change some scenes carry

mod context;
mod effects;
mod library;
mod runner;
mod scene;

pub use context::*;
pub use effects::*;
pub use library::*;
pub use runner::*;
pub use scene::*;
