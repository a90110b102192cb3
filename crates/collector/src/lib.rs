//! Scheduled collection of upstream data into the cache, and the
//! live-then-cache lookups served to HTTP clients.

pub mod collector;
pub mod cycle;
pub mod error;
pub mod query;

pub use collector::Collector;
pub use cycle::{CycleReport, CycleRunner};
pub use error::CollectError;
pub use query::{Lookup, ResourceQuery};
