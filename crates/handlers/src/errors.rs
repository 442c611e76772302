//! Handler errors module

use thiserror::Error;

/// Faults raised while talking to the build server.
///
/// Only transport-level failures end up here. A reachable server that
/// answers with an unexpected status is not an error; the pipeline
/// handler turns that into a response.
#[derive(Error, Debug)]
pub enum TriggerError {
    #[error("Failed to build HTTP client: {source}")]
    ClientBuild { source: reqwest::Error },

    #[error("Transport error calling {url}: {source}")]
    Transport { url: String, source: reqwest::Error },
}

/// Unhandled faults that abort an invocation
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Pipeline trigger failed: {source}")]
    Trigger {
        #[from]
        source: TriggerError,
    },

    #[error("Failed to emit log line: {source}")]
    Output { source: std::io::Error },

    #[error("Serialization error: {source}")]
    Serialization { source: serde_json::Error },
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::Serialization { source: err }
    }
}

/// Configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {name}")]
    MissingVar { name: String },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}
