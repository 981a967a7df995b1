use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use site_gateway::config::{load_config, ProcessEnv};
use site_gateway::lifecycle;
use site_gateway::observability::logging::init_logging;
use site_gateway::session::ChannelAuthSource;

#[derive(Parser)]
#[command(name = "site-gateway")]
#[command(about = "Personal multi-section site with subdomain routing", long_about = None)]
struct Args {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // A missing .env is fine; the process environment may already be complete
    let _ = dotenvy::dotenv();

    let mut config = match load_config(args.config.as_deref(), &ProcessEnv) {
        Ok(config) => config,
        Err(e) => {
            init_logging("info", false);
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability.log_level, config.features.debug);
    tracing::info!("site-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    // The hosted identity provider is not wired in; nobody is signed in
    let auth = Arc::new(ChannelAuthSource::signed_out());

    lifecycle::run(config, auth).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
