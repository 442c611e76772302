//! Opaque invocation inputs.
//!
//! The runtime hands every handler an event and a context. Neither influences
//! what the handlers return; the context only decorates log output.

/// Triggering event as supplied by the runtime.
pub type InvocationEvent = serde_json::Value;

/// Execution metadata for a single invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    /// Runtime-assigned request identifier
    pub request_id: String,
    /// Identifier of the invoked function (ARN on Lambda, name locally)
    pub function_id: String,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>, function_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            function_id: function_id.into(),
        }
    }

    /// Context for an in-process invocation outside any runtime.
    pub fn local(function_id: impl Into<String>) -> Self {
        Self::new("local", function_id)
    }
}
