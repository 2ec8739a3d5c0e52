use anyhow::Result;
use clap::Parser;
use meta_relay::{
    api::{self, AppState},
    config::RelayConfig,
    store::FrameStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(about = "Relay gameplay metadata from the game client to overlay frame files")]
pub struct Args {
    /// Config file (toml/yaml/json). Defaults to an optional `relay.*` in the working dir.
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Address to bind.
    #[arg(long)]
    host: Option<String>,
    /// Port to listen on.
    #[arg(long, short)]
    port: Option<u16>,
    /// Directory frame files are written to.
    #[arg(long)]
    meta_dir: Option<PathBuf>,
    /// Directory with the overlay web page, served at `/`.
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut RelayConfig) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = self.meta_dir {
            config.meta_dir = dir;
        }
        if let Some(dir) = self.static_dir {
            config.static_dir = Some(dir);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,meta_relay=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration
    let mut config = RelayConfig::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;
    info!("Configuration loaded: {:?}", config);

    let store = Arc::new(FrameStore::open(&config.meta_dir, config.naming()).await?);
    let state = AppState::new(store);

    api::serve(state, &config).await
}
