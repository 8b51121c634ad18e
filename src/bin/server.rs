//! RiddleQuest server - HTTP front-end for the riddle game

use clap::Parser;
use riddlequest::agent::{AgentDispatcher, ChatClient};
use riddlequest::config::{apply_env_overrides, load_config_from_path, validate_config, Config, LogConfig, LogFormat};
use riddlequest::game::{GameEngine, SessionStore};
use riddlequest::gateway::{build_router, AppState};
use riddlequest::maps::MapsClient;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "riddlequest-server", about = "Location-based riddle game server", version)]
struct Args {
    /// Bind address (overrides gateway.bind)
    #[arg(long)]
    bind: Option<String>,

    /// Port (overrides gateway.port)
    #[arg(long, short)]
    port: Option<u16>,

    /// Config file (defaults to RIDDLEQUEST_CONFIG or the user config dir)
    #[arg(long, short)]
    config: Option<PathBuf>,
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_new(&log.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn load(args: &Args) -> riddlequest::Result<Config> {
    match &args.config {
        Some(path) => {
            let mut config = load_config_from_path(path)?;
            apply_env_overrides(&mut config);
            Ok(config)
        }
        None => Config::from_env(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = load(&args)?;
    if let Some(bind) = &args.bind {
        config.gateway.bind = bind.clone();
    }
    if let Some(port) = args.port {
        config.gateway.port = port;
    }

    init_tracing(&config.log);

    let validation = validate_config(&config);
    for issue in &validation.warnings {
        warn!("Config warning: {}", issue);
    }
    if !validation.valid {
        for issue in &validation.errors {
            tracing::error!("Config error: {}", issue);
        }
        anyhow::bail!("invalid configuration ({} errors)", validation.errors.len());
    }

    let llm = Arc::new(ChatClient::new(config.provider.openai.clone())?);
    let places = Arc::new(MapsClient::new(config.maps.clone())?);

    let engine = GameEngine::new(places, llm.clone(), &config.game)?;
    let sessions = SessionStore::new(&config.sessions, config.agent.history_limit);
    let dispatcher = AgentDispatcher::new(llm, engine, sessions, config.agent.clone());

    let app = build_router(AppState { dispatcher });

    let addr: SocketAddr = format!("{}:{}", config.gateway.bind, config.gateway.port).parse()?;
    info!("{} {} listening on http://{}", riddlequest::NAME, riddlequest::VERSION, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
