//! Entity definitions for the market world.

mod era;
mod market;
mod whale;

pub use era::*;
pub use market::*;
pub use whale::*;
