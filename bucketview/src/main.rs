//! bucketview - browse S3-compatible object storage from a web browser

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bucketview::config::Config;
use bucketview::router;
use bucketview_s3::{Browser, S3Store};

#[derive(Parser, Debug)]
#[command(name = "bucketview")]
#[command(about = "Browse and download objects from S3-compatible storage", long_about = None)]
struct Args {
    /// Configuration profile to load from config/
    #[arg(long, default_value = "localkube", env = "ENV")]
    env: String,

    /// Host to bind to (overrides the profile)
    #[arg(long, env = "BUCKETVIEW_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides the profile)
    #[arg(short, long, env = "BUCKETVIEW_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "BUCKETVIEW_LOG_LEVEL")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("bucketview={},tower_http=debug", args.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load(&args.env)?;
    info!(profile = %args.env, "Loaded configuration");

    let scratch_dir = config
        .download
        .scratch_dir
        .clone()
        .unwrap_or_else(std::env::temp_dir);
    let store = S3Store::new(&config.aws);
    let browser = Browser::new(Arc::new(store), scratch_dir);

    let app = router::create_router(router::AppState { browser });

    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    router::serve(listener, app).await?;

    Ok(())
}
