//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept a pool or an open transaction as the first argument.
//! Timestamps are supplied by the caller so a batch shares one
//! `recorded_at`.

pub mod assignment_repo;
pub mod campaign_repo;
pub mod dispatch_repo;
pub mod planet_event_repo;
pub mod planet_status_repo;
pub mod snapshot_repo;
pub mod system_status_repo;

pub use assignment_repo::AssignmentRepo;
pub use campaign_repo::CampaignRepo;
pub use dispatch_repo::DispatchRepo;
pub use planet_event_repo::PlanetEventRepo;
pub use planet_status_repo::PlanetStatusRepo;
pub use snapshot_repo::{StatisticsRepo, WarStatusRepo};
pub use system_status_repo::SystemStatusRepo;

/// `LIMIT` value for an optional row limit. SQLite treats a negative limit
/// as "no limit".
pub(crate) fn sql_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(-1)
}
