//! Invoke command implementation
//!
//! Runs a function once, in-process, and prints the response it returns.

use anyhow::{Context, Result};
use pipehook_adapters::FunctionName;
use pipehook_handlers::InvocationContext;
use serde_json::Value;

/// Arguments for the invoke command
pub struct InvokeArgs {
    /// Function to run
    pub function: FunctionName,
    /// Event JSON string
    pub event: Option<String>,
}

/// Parse an optional event string, defaulting to `null`.
pub fn parse_event(event: Option<&str>) -> Result<Value> {
    match event {
        Some(raw) => serde_json::from_str(raw).context("Event is not valid JSON"),
        None => Ok(Value::Null),
    }
}

/// Execute the invoke command
pub async fn execute_invoke_command(args: InvokeArgs) -> Result<()> {
    let event = parse_event(args.event.as_deref())?;
    let router = super::router_for(args.function)?;

    println!("🚀 Invoking {}...", args.function);

    let context = InvocationContext::local(args.function.as_str());
    let response = router
        .dispatch(args.function, &event, &context)
        .await
        .with_context(|| format!("Invocation of {} failed", args.function))?;

    if response.is_success() {
        println!("✅ Response:");
    } else {
        println!("❌ Response:");
    }
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
