//! CLI command modules

pub mod invoke;
pub mod lambda;
pub mod serve;

pub use invoke::{execute_invoke_command, InvokeArgs};
pub use lambda::{execute_lambda_command, LambdaArgs};
pub use serve::{execute_serve_command, ServeArgs};

use anyhow::{Context, Result};
use pipehook_adapters::{FunctionName, FunctionRouter};
use pipehook_handlers::{PipelineConfig, PipelineTrigger};

/// Build a router able to run `function`, loading Jenkins settings from the
/// environment when the function needs them.
pub fn router_for(function: FunctionName) -> Result<FunctionRouter> {
    match function {
        FunctionName::TimestampLogger => Ok(FunctionRouter::new()),
        FunctionName::PipelineTrigger => pipeline_router(),
    }
}

/// Router serving both handlers, configured from the environment.
pub fn pipeline_router() -> Result<FunctionRouter> {
    let config = PipelineConfig::from_env().context("Jenkins configuration incomplete")?;
    let trigger = PipelineTrigger::from_config(config).context("Failed to create Jenkins client")?;
    Ok(FunctionRouter::with_pipeline(trigger))
}
