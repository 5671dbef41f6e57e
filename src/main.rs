//! URL Extract MCP Server - Entry point
//!
//! Positional arguments are the resource directories files may be read from
//! and exported to.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url_extract_mcp_server::run_server_with_dirs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "url_extract_mcp_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let resource_dirs: Vec<String> = std::env::args().skip(1).collect();
    tracing::info!(?resource_dirs, "Starting URL Extract MCP Server");

    run_server_with_dirs(resource_dirs).await
}
