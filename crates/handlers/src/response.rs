//! Invocation response returned to the runtime.

use serde::{Deserialize, Serialize};

/// Response payload handed back to the invoking runtime.
///
/// Serializes as `{"statusCode": <int>, "body": "<string>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// HTTP-style status code
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// Response body
    pub body: String,
}

impl Response {
    /// Build a response from a status code and body.
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// 200 response
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// 500 response
    pub fn server_error(body: impl Into<String>) -> Self {
        Self::new(500, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
