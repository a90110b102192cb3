//! Shared response body types.

use serde::Serialize;

/// Body returned by the `POST .../refresh` endpoints.
#[derive(Debug, Serialize)]
pub struct RefreshResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> RefreshResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
