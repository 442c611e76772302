//! Runtime adapters (Lambda, local HTTP invoke server)
//!
//! This crate binds the pipehook handlers to the environments that invoke
//! them: the AWS Lambda runtime loop in production, and a small axum server
//! or in-process dispatch during development.

pub mod http_server;
pub mod lambda;
pub mod router;

pub use http_server::{HttpServer, ServerConfig};
pub use lambda::run_function;
pub use router::{FunctionName, FunctionRouter, RouterError};
