//! Local invoke server
//!
//! Emulates the runtime's invoke boundary over HTTP for local development:
//!
//! - `POST /invoke/:function` runs a function with the request body as event
//! - `GET /functions` lists what this server can run
//!
//! A handler-returned response (including the pipeline's 500 body) comes
//! back with HTTP 200. Unhandled handler faults come back as HTTP 502, so
//! the two failure kinds stay distinguishable.

use crate::router::{FunctionName, FunctionRouter, RouterError};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use pipehook_handlers::{BuildServer, InvocationContext, JenkinsClient, Response};
use serde::Serialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Default listen port
pub const DEFAULT_PORT: u16 = 9000;

/// Configuration for the local invoke server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Listen on the loopback interface at `port`.
    pub fn localhost(port: u16) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], port)),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::localhost(DEFAULT_PORT)
    }
}

/// Error payload, shaped like a runtime invocation error
#[derive(Debug, Serialize)]
struct ErrorBody {
    #[serde(rename = "errorType")]
    error_type: &'static str,
    #[serde(rename = "errorMessage")]
    error_message: String,
}

struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error_type: &'static str, message: impl ToString) -> Self {
        Self {
            status,
            body: ErrorBody {
                error_type,
                error_message: message.to_string(),
            },
        }
    }
}

impl From<RouterError> for ApiError {
    fn from(err: RouterError) -> Self {
        match err {
            RouterError::UnknownFunction { .. } => {
                ApiError::new(StatusCode::NOT_FOUND, "UnknownFunction", err)
            }
            RouterError::NotConfigured { .. } => {
                ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "NotConfigured", err)
            }
            RouterError::Handler { .. } => {
                ApiError::new(StatusCode::BAD_GATEWAY, "Unhandled", err)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

struct AppState<S> {
    router: FunctionRouter<S>,
    invocations: AtomicU64,
}

/// HTTP front end for a [`FunctionRouter`].
pub struct HttpServer<S = JenkinsClient> {
    config: ServerConfig,
    state: Arc<AppState<S>>,
}

impl<S: BuildServer + 'static> HttpServer<S> {
    /// Creates a new [`HttpServer`] serving `router`.
    pub fn new(config: ServerConfig, router: FunctionRouter<S>) -> Self {
        Self {
            config,
            state: Arc::new(AppState {
                router,
                invocations: AtomicU64::new(0),
            }),
        }
    }

    /// Access the configuration associated with this server.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the axum application.
    pub fn app(&self) -> Router {
        Router::new()
            .route("/functions", get(list_functions::<S>))
            .route("/invoke/:function", post(invoke_function::<S>))
            .with_state(self.state.clone())
    }

    /// Bind the configured address and serve until the process stops.
    pub async fn run(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(&self, listener: TcpListener) -> std::io::Result<()> {
        info!(addr = %listener.local_addr()?, "local invoke server listening");
        axum::serve(listener, self.app()).await
    }
}

async fn list_functions<S: BuildServer + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<Value> {
    let functions: Vec<&str> = state
        .router
        .available()
        .into_iter()
        .map(|f| f.as_str())
        .collect();
    Json(json!({ "functions": functions }))
}

async fn invoke_function<S: BuildServer + 'static>(
    Path(function): Path<String>,
    State(state): State<Arc<AppState<S>>>,
    body: Bytes,
) -> Result<Json<Response>, ApiError> {
    let function: FunctionName = function.parse()?;

    let event: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, "InvalidEvent", e))?
    };

    let seq = state.invocations.fetch_add(1, Ordering::Relaxed) + 1;
    let context = InvocationContext::new(format!("local-{}", seq), function.as_str());

    match state.router.dispatch(function, &event, &context).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            warn!(%function, error = %e, "invocation failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use pipehook_handlers::{PipelineConfig, PipelineTrigger, TriggerError};
    use tower::ServiceExt;

    struct FixedStatus(u16);

    impl BuildServer for FixedStatus {
        async fn trigger(&self) -> Result<u16, TriggerError> {
            Ok(self.0)
        }
    }

    async fn send<S: BuildServer + 'static>(
        server: &HttpServer<S>,
        method: &str,
        uri: &str,
        body: &str,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = server.app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(ServerConfig::localhost(9001).bind_addr.port(), 9001);
    }

    #[tokio::test]
    async fn test_invoke_timestamp_logger() {
        let server = HttpServer::new(ServerConfig::default(), FunctionRouter::new());
        let (status, body) = send(&server, "POST", "/invoke/timestamp-logger", "{\"a\": 1}").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"statusCode": 200, "body": "\"Print executed\""}));
    }

    #[tokio::test]
    async fn test_empty_body_is_null_event() {
        let server = HttpServer::new(ServerConfig::default(), FunctionRouter::new());
        let (status, _) = send(&server, "POST", "/invoke/timestamp-logger", "").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_pipeline_failure_is_a_response() {
        let router = FunctionRouter::with_pipeline(PipelineTrigger::new(FixedStatus(404)));
        let server = HttpServer::new(ServerConfig::default(), router);
        let (status, body) = send(&server, "POST", "/invoke/pipeline-trigger", "{}").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"statusCode": 500, "body": "Error triggering pipeline"})
        );
    }

    #[tokio::test]
    async fn test_transport_fault_is_bad_gateway() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config =
            PipelineConfig::new(format!("http://{}/job/app/build", addr), "deploy", "token").unwrap();
        let router = FunctionRouter::with_pipeline(PipelineTrigger::from_config(config).unwrap());
        let server = HttpServer::new(ServerConfig::default(), router);

        let (status, body) = send(&server, "POST", "/invoke/pipeline-trigger", "").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["errorType"], "Unhandled");
    }

    #[tokio::test]
    async fn test_unknown_function_is_not_found() {
        let server = HttpServer::new(ServerConfig::default(), FunctionRouter::new());
        let (status, body) = send(&server, "POST", "/invoke/nope", "{}").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errorType"], "UnknownFunction");
        assert_eq!(body["errorMessage"], "Unknown function: nope");
    }

    #[tokio::test]
    async fn test_unconfigured_pipeline_is_unavailable() {
        let server = HttpServer::new(ServerConfig::default(), FunctionRouter::new());
        let (status, body) = send(&server, "POST", "/invoke/pipeline-trigger", "{}").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["errorType"], "NotConfigured");
    }

    #[tokio::test]
    async fn test_invalid_event_is_rejected() {
        let server = HttpServer::new(ServerConfig::default(), FunctionRouter::new());
        let (status, body) = send(&server, "POST", "/invoke/timestamp-logger", "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errorType"], "InvalidEvent");
    }

    #[tokio::test]
    async fn test_lists_available_functions() {
        let router = FunctionRouter::with_pipeline(PipelineTrigger::new(FixedStatus(201)));
        let server = HttpServer::new(ServerConfig::default(), router);
        let (status, body) = send(&server, "GET", "/functions", "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"functions": ["timestamp-logger", "pipeline-trigger"]})
        );
    }
}
