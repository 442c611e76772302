use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pipehook_adapters::http_server::DEFAULT_PORT;
use pipehook_adapters::FunctionName;
use tracing_subscriber::EnvFilter;

mod commands;
use commands::{
    execute_invoke_command, execute_lambda_command, execute_serve_command, InvokeArgs, LambdaArgs,
    ServeArgs,
};

#[derive(Parser)]
#[command(name = "pipehook")]
#[command(about = "Pipehook - serverless Jenkins trigger handlers")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Invoke a function once, locally
    Invoke(InvokeCommandArgs),
    /// Run the local invoke server
    Serve(ServeCommandArgs),
    /// Run a function under the AWS Lambda runtime
    Lambda(LambdaCommandArgs),
}

#[derive(Args)]
pub struct InvokeCommandArgs {
    /// Function name (timestamp-logger, pipeline-trigger)
    pub function: FunctionName,
    /// Event JSON string
    #[arg(short, long)]
    pub event: Option<String>,
}

#[derive(Args)]
pub struct ServeCommandArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

#[derive(Args)]
pub struct LambdaCommandArgs {
    /// Function name (timestamp-logger, pipeline-trigger)
    #[arg(env = "PIPEHOOK_FUNCTION")]
    pub function: FunctionName,
}

fn init_tracing(ansi: bool) {
    // stdout belongs to handler output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Invoke(args) => {
            init_tracing(true);
            execute_invoke_command(InvokeArgs {
                function: args.function,
                event: args.event,
            })
            .await
        }
        Commands::Serve(args) => {
            init_tracing(true);
            execute_serve_command(ServeArgs { port: args.port }).await
        }
        Commands::Lambda(args) => {
            // CloudWatch does not render escape codes
            init_tracing(false);
            execute_lambda_command(LambdaArgs {
                function: args.function,
            })
            .await
        }
    }
}
