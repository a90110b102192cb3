#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An upstream record lacks a field required to store it.
    #[error("Malformed {kind} record: missing {field}")]
    MalformedRecord {
        kind: &'static str,
        field: &'static str,
    },
}
