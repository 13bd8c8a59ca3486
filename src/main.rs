//! omics-api - dashboard backend binary

use clap::Parser;
use omics_dashboard::cloud::AwsCloud;
use omics_dashboard::{logging, server, AppState, DashboardConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "omics-api", version, about = "Omics demo dashboard backend")]
struct Args {
    /// Path to the deployment's key=value config file
    #[arg(long, default_value = "config.sh")]
    config: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind; the PORT environment variable takes precedence
    #[arg(long, default_value_t = 5000)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_logging();

    let config = DashboardConfig::load(&args.config);
    tracing::info!(
        "Loaded configuration: region={} bucket={} stack={}",
        config.region,
        config.bucket,
        config.stack_name
    );

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(args.port);
    let addr: SocketAddr = format!("{}:{}", args.host, port).parse()?;

    let cloud = Arc::new(AwsCloud::connect(&config).await);
    let state = AppState::new(config, cloud);

    server::run_server(addr, state).await
}
