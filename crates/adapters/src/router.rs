//! Function router
//!
//! Maps deployable function names onto handler instances so every adapter
//! (Lambda loop, local server, CLI) dispatches the same way.

use pipehook_handlers::{
    BuildServer, HandlerError, InvocationContext, InvocationEvent, JenkinsClient, PipelineTrigger,
    Response, TimestampLogger,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Functions that can be invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionName {
    /// Logs the invocation time
    TimestampLogger,
    /// Queues a Jenkins build
    PipelineTrigger,
}

impl FunctionName {
    /// Stable kebab-case name used on the command line and in URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionName::TimestampLogger => "timestamp-logger",
            FunctionName::PipelineTrigger => "pipeline-trigger",
        }
    }

    /// Get all functions
    pub fn all() -> Vec<FunctionName> {
        vec![FunctionName::TimestampLogger, FunctionName::PipelineTrigger]
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionName {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FunctionName::all()
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| RouterError::UnknownFunction {
                name: s.to_string(),
            })
    }
}

/// Routing errors
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Unknown function: {name}")]
    UnknownFunction { name: String },

    #[error("Function {function} is not configured")]
    NotConfigured { function: FunctionName },

    #[error(transparent)]
    Handler {
        #[from]
        source: HandlerError,
    },
}

/// Dispatches invocations to handler instances.
#[derive(Debug, Clone)]
pub struct FunctionRouter<S = JenkinsClient> {
    timestamp: TimestampLogger,
    pipeline: Option<PipelineTrigger<S>>,
}

impl FunctionRouter<JenkinsClient> {
    /// Router with only the handlers that need no configuration.
    pub fn new() -> Self {
        Self {
            timestamp: TimestampLogger::new(),
            pipeline: None,
        }
    }
}

impl Default for FunctionRouter<JenkinsClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BuildServer> FunctionRouter<S> {
    /// Router serving both handlers.
    pub fn with_pipeline(pipeline: PipelineTrigger<S>) -> Self {
        Self {
            timestamp: TimestampLogger::new(),
            pipeline: Some(pipeline),
        }
    }

    /// Whether `function` can be dispatched by this router.
    pub fn is_available(&self, function: FunctionName) -> bool {
        match function {
            FunctionName::TimestampLogger => true,
            FunctionName::PipelineTrigger => self.pipeline.is_some(),
        }
    }

    /// Functions this router can dispatch
    pub fn available(&self) -> Vec<FunctionName> {
        FunctionName::all()
            .into_iter()
            .filter(|f| self.is_available(*f))
            .collect()
    }

    /// Invoke `function` with the given event and context.
    pub async fn dispatch(
        &self,
        function: FunctionName,
        event: &InvocationEvent,
        context: &InvocationContext,
    ) -> Result<Response, RouterError> {
        debug!(%function, request_id = %context.request_id, "dispatching invocation");

        let response = match function {
            FunctionName::TimestampLogger => self.timestamp.handle(event, context)?,
            FunctionName::PipelineTrigger => {
                let pipeline = self
                    .pipeline
                    .as_ref()
                    .ok_or(RouterError::NotConfigured { function })?;
                pipeline.handle(event, context).await?
            }
        };

        Ok(response)
    }
}
