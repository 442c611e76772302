//! Pipeline trigger handler
//!
//! Fires a single authenticated `POST` at a Jenkins build endpoint and folds
//! the answer into a binary success/failure response. Only the status code
//! is inspected: 201 means the build was queued, anything else is a failure.
//!
//! Transport faults are deliberately left unhandled. They surface as
//! [`HandlerError::Trigger`] so the runtime records a failed invocation
//! instead of a 500 response.

use crate::config::PipelineConfig;
use crate::errors::{HandlerError, TriggerError};
use crate::invocation::{InvocationContext, InvocationEvent};
use crate::response::Response;

use std::future::Future;
use tracing::{info, warn};

/// Status Jenkins answers with once a build is queued
pub const BUILD_QUEUED_STATUS: u16 = 201;

/// Body returned when the build was queued
pub const TRIGGERED_BODY: &str = "Pipeline triggered";

/// Body returned for any other status
pub const FAILED_BODY: &str = "Error triggering pipeline";

/// A build server that can be asked to start a pipeline.
pub trait BuildServer: Send + Sync {
    /// Request a build and return the HTTP status the server answered with.
    fn trigger(&self) -> impl Future<Output = Result<u16, TriggerError>> + Send;
}

/// [`BuildServer`] backed by a Jenkins remote build URL.
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    config: PipelineConfig,
    client: reqwest::Client,
}

impl JenkinsClient {
    /// Create a client for the configured endpoint.
    ///
    /// No request timeout is set; the invoking runtime bounds the call.
    pub fn new(config: PipelineConfig) -> Result<Self, TriggerError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TriggerError::ClientBuild { source: e })?;

        Ok(Self { config, client })
    }
}

impl BuildServer for JenkinsClient {
    async fn trigger(&self) -> Result<u16, TriggerError> {
        let response = self
            .client
            .post(&self.config.url)
            .basic_auth(&self.config.user, Some(&self.config.token))
            .send()
            .await
            .map_err(|e| TriggerError::Transport {
                url: self.config.url.clone(),
                source: e,
            })?;

        Ok(response.status().as_u16())
    }
}

/// Triggers a pipeline on every invocation.
#[derive(Debug, Clone)]
pub struct PipelineTrigger<S = JenkinsClient> {
    server: S,
}

impl PipelineTrigger<JenkinsClient> {
    /// Build a trigger that posts to Jenkins with the given configuration.
    pub fn from_config(config: PipelineConfig) -> Result<Self, TriggerError> {
        Ok(Self::new(JenkinsClient::new(config)?))
    }
}

impl<S: BuildServer> PipelineTrigger<S> {
    pub fn new(server: S) -> Self {
        Self { server }
    }

    /// Handle an invocation. The event and context do not affect the request.
    pub async fn handle(
        &self,
        _event: &InvocationEvent,
        context: &InvocationContext,
    ) -> Result<Response, HandlerError> {
        let status = self.server.trigger().await?;

        if status == BUILD_QUEUED_STATUS {
            info!(request_id = %context.request_id, status, "pipeline triggered");
            Ok(Response::ok(TRIGGERED_BODY))
        } else {
            warn!(request_id = %context.request_id, status, "build server rejected trigger");
            Ok(Response::server_error(FAILED_BODY))
        }
    }
}
