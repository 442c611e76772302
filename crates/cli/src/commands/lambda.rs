//! Lambda command implementation

use anyhow::{anyhow, Result};
use pipehook_adapters::{run_function, FunctionName};
use tracing::info;

/// Arguments for the lambda command
pub struct LambdaArgs {
    /// Function to serve
    pub function: FunctionName,
}

/// Serve one function under the Lambda runtime loop
pub async fn execute_lambda_command(args: LambdaArgs) -> Result<()> {
    let router = super::router_for(args.function)?;

    info!(function = %args.function, "handing control to lambda runtime");
    run_function(router, args.function)
        .await
        .map_err(|e| anyhow!(e))
}
