//! AWS Lambda adapter
//!
//! Runs one routed function under the `lambda_runtime` event loop. Handler
//! errors go back to the runtime as errors so Lambda records a failed
//! invocation.

use crate::router::{FunctionName, FunctionRouter, RouterError};
use lambda_runtime::{service_fn, LambdaEvent};
use pipehook_handlers::{BuildServer, InvocationContext, Response};
use serde_json::Value;
use tracing::info;

/// Serve `function` until the Lambda runtime shuts the process down.
pub async fn run_function<S: BuildServer>(
    router: FunctionRouter<S>,
    function: FunctionName,
) -> Result<(), lambda_runtime::Error> {
    if !router.is_available(function) {
        return Err(RouterError::NotConfigured { function }.into());
    }

    info!(%function, "starting lambda runtime loop");

    let router = &router;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_event(router, function, event)
            .await
            .map_err(lambda_runtime::Error::from)
    }))
    .await
}

/// Convert a Lambda event into an invocation and dispatch it.
pub async fn handle_event<S: BuildServer>(
    router: &FunctionRouter<S>,
    function: FunctionName,
    event: LambdaEvent<Value>,
) -> Result<Response, RouterError> {
    let (payload, lambda_context) = event.into_parts();
    let context = InvocationContext::new(
        lambda_context.request_id,
        lambda_context.invoked_function_arn,
    );

    router.dispatch(function, &payload, &context).await
}
