/// Why a collection cycle counts as failed.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// The cycle task panicked or was aborted.
    #[error("Collection cycle aborted: {0}")]
    Aborted(String),
}
