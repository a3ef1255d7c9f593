use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{prelude::*, EnvFilter};

use mock_server::MockConfig;

/// Standalone mock of the todo service for running the harness by hand.
#[derive(Debug, Parser)]
#[command(name = "mock-server")]
struct Args {
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    #[arg(long, env = "MOCK_ADMIN_USERNAME", default_value = "admin")]
    admin_username: String,

    #[arg(long, env = "MOCK_ADMIN_PASSWORD", default_value = "admin")]
    admin_password: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "MOCK_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("mock_server={},tower_http=debug", args.log_level))
    });
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    let addr = format!("127.0.0.1:{}", args.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");

    let config = MockConfig {
        admin_username: args.admin_username,
        admin_password: args.admin_password,
        ..MockConfig::default()
    };
    mock_server::run_with(listener, config).await
}
