/// Primary keys and upstream identifiers are SQLite INTEGERs.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
