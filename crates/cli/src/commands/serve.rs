//! Serve command implementation
//!
//! Starts the local invoke server. The pipeline trigger is only routed when
//! the Jenkins settings are present in the environment.

use anyhow::{Context, Result};
use pipehook_adapters::{FunctionRouter, HttpServer, ServerConfig};
use tracing::warn;

/// Arguments for the serve command
pub struct ServeArgs {
    /// Port to listen on
    pub port: u16,
}

/// Execute the serve command
pub async fn execute_serve_command(args: ServeArgs) -> Result<()> {
    let config = ServerConfig::localhost(args.port);

    let router = match super::pipeline_router() {
        Ok(router) => router,
        Err(e) => {
            warn!(error = %format!("{:#}", e), "pipeline-trigger disabled");
            FunctionRouter::new()
        }
    };

    println!("🌐 Starting local invoke server on http://{}", config.bind_addr);
    for function in router.available() {
        println!("   POST /invoke/{}", function);
    }
    println!();

    let server = HttpServer::new(config, router);
    server.run().await.context("Local invoke server failed")
}
