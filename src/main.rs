use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use alumni_portal::alumni::AlumniStore;
use alumni_portal::chat::ChatResponder;
use alumni_portal::config::Config;
use alumni_portal::llm::create_llm_provider;
use alumni_portal::web::{PortalState, start_server};

#[derive(Parser, Debug)]
#[command(name = "alumni-portal", version, about = "Esprit alumni portal server")]
struct Cli {
    /// Address to listen on (overrides PORTAL_HOST).
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORTAL_PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Skip the Gemini probe and answer chat from the keyword table.
    #[arg(long)]
    offline: bool,

    /// Emit logs as JSON lines.
    #[arg(long, env = "PORTAL_LOG_JSON")]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("alumni_portal=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_target(false)))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    let addr = config.server.socket_addr()?;

    let chat = if cli.offline {
        tracing::info!("Offline mode: chat will use scripted replies");
        ChatResponder::offline()
    } else {
        let provider = create_llm_provider(config.gemini.as_ref())?;
        ChatResponder::initialize(provider).await
    };
    tracing::info!(chat = chat.availability().as_str(), "Chat responder ready");

    let store = Arc::new(AlumniStore::new());
    let state = Arc::new(PortalState::new(store, chat));
    let bound = start_server(addr, Arc::clone(&state), config.server.max_body_bytes).await?;
    tracing::info!("Alumni portal listening on http://{}", bound);

    tokio::signal::ctrl_c().await?;
    tracing::info!("Received Ctrl-C");
    state.shutdown().await;

    Ok(())
}
