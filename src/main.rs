//! esa-mcp binary: serves the esa.io tools over stdio.

use std::time::Duration;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use esa_mcp::{EsaClient, EsaConfig, McpServer, ToolRegistry, DEFAULT_API_URL};

/// MCP server for the esa.io team wiki.
#[derive(Debug, Parser)]
#[command(name = "esa-mcp", version, about)]
struct Args {
    /// esa.io personal access token
    #[arg(long, env = "ESA_TOKEN", hide_env_values = true)]
    token: String,

    /// esa.io team name (the subdomain of <team>.esa.io)
    #[arg(long, env = "ESA_TEAM_NAME")]
    team: String,

    /// API root URL
    #[arg(long, env = "ESA_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log level used when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    // stdout carries the protocol, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("esa_mcp={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

async fn run(args: Args) -> esa_mcp::Result<()> {
    let mut config = EsaConfig::new(args.token, args.team)?.with_api_url(args.api_url);
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let client = EsaClient::new(config)?;
    let registry = ToolRegistry::new()?;
    McpServer::new(client, registry).run().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    if let Err(e) = run(args).await {
        error!(error = %e, "esa-mcp exited with an error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
