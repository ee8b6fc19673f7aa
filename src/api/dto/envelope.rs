//! Response envelopes shared by every resource.

use serde::Serialize;

/// `{ message, data }` body used by list, fetch and update responses.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

impl<T> DataResponse<Vec<T>> {
    /// List envelope whose message says so when the table is empty.
    pub fn list(found: &str, empty: &str, data: Vec<T>) -> Self {
        let message = if data.is_empty() { empty } else { found };
        Self::new(message, data)
    }
}

/// `{ message }` body returned by deletions.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
