//! Row structs for the cache tables.
//!
//! Each submodule contains a `FromRow` entity struct matching the table, plus
//! any serializable view the HTTP layer returns directly.

pub mod campaign;
pub mod feed;
pub mod planet;
pub mod snapshot;
pub mod system_status;
