//! Linkboard HTTP server entry point.
//!
//! `linkboard serve` (the default) runs the HTTP API and frontend,
//! `linkboard repair` rewrites all sort positions to dense `0..n-1`,
//! `linkboard init-config` writes the effective settings to the config file.

use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use linkboard::app::App;
use linkboard::services::board_service::BoardServiceTrait;
use linkboard::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use linkboard::types::settings::BoardSettings;
use linkboard::web;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, env = "LINKBOARD_CONFIG")]
    config: Option<String>,

    /// SQLite database file (overrides config and environment)
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Address to listen on, e.g. 0.0.0.0:8000
        #[arg(long)]
        bind: Option<String>,
        /// Directory holding the frontend
        #[arg(long)]
        static_dir: Option<String>,
    },
    /// Rewrite every sibling set to dense sort positions
    Repair,
    /// Write the effective settings to the config file
    InitConfig,
}

fn init_logging(settings: &BoardSettings) {
    // Log to a file (JSON, daily rotation) only when a log directory is configured.
    let file_layer = settings.log_dir.as_ref().map(|dir| {
        fmt::layer()
            .with_writer(rolling::daily(dir, "linkboard.log"))
            .with_ansi(false)
            .json()
    });

    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    // RUST_LOG wins over the configured filter.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn serve(app: App) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let static_dir = Path::new(&app.settings.static_dir);
    let router = if static_dir.is_dir() {
        web::create_router(app.board.clone(), Some(static_dir))
    } else {
        info!(static_dir = %app.settings.static_dir, "frontend directory missing, serving API only");
        web::create_router(app.board.clone(), None)
    };

    let listener = tokio::net::TcpListener::bind(&app.settings.bind_address).await?;
    info!(address = %listener.local_addr()?, "Linkboard listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let mut settings_engine = SettingsEngine::new(args.config);
    settings_engine.load()?;
    if let Some(db) = args.db {
        settings_engine.settings_mut().database_path = db;
    }
    if let Some(Command::Serve { bind, static_dir }) = &args.command {
        let settings = settings_engine.settings_mut();
        if let Some(bind) = bind {
            settings.bind_address = bind.clone();
        }
        if let Some(dir) = static_dir {
            settings.static_dir = dir.clone();
        }
    }

    init_logging(settings_engine.get_settings());
    info!("Starting linkboard, version: {}", env!("CARGO_PKG_VERSION"));

    match args.command.unwrap_or(Command::Serve { bind: None, static_dir: None }) {
        Command::InitConfig => {
            settings_engine.save()?;
            info!(path = settings_engine.get_config_path(), "wrote configuration");
        }
        Command::Repair => {
            let app = App::new(settings_engine.get_settings().clone())?;
            let changed = app.board.repair_order()?;
            info!(changed, "sort positions repaired");
        }
        Command::Serve { .. } => {
            let app = App::new(settings_engine.get_settings().clone())?;
            serve(app).await?;
        }
    }

    Ok(())
}
