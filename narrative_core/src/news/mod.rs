//! News - turns the day's market events, whale moves and era shifts into
//! headlines.
//!
//! - **builder**: pure per-topic constructors
//! - **aggregator**: daily selection, dedup against the news log, bounded emission

mod aggregator;
mod builder;

pub use aggregator::*;
pub use builder::*;
