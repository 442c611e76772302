//! Pipehook serverless handlers
//!
//! Two independent, stateless handlers invoked by an event-driven runtime:
//! [`TimestampLogger`] announces an upcoming Jenkins run on stdout, and
//! [`PipelineTrigger`] queues a Jenkins build over HTTP.

pub mod config;
pub mod errors;
pub mod invocation;
pub mod pipeline;
pub mod response;
pub mod timestamp;

// Re-export key types for easy access
pub use config::PipelineConfig;
pub use errors::{ConfigError, HandlerError, TriggerError};
pub use invocation::{InvocationContext, InvocationEvent};
pub use pipeline::{BuildServer, JenkinsClient, PipelineTrigger};
pub use response::Response;
pub use timestamp::TimestampLogger;
