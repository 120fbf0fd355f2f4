//! CLI entrypoint for TravelMate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};
use travelmate_application::{
    ChatSession, ChatSessionError, ConversationStore, NoConversationStore, RelayChatUseCase,
    SessionOptions,
};
use travelmate_infrastructure::{
    ConfigLoader, EnvCredential, FileConfig, GatewayUpstream, HttpRelayTransport, build_store,
    http_client,
};
use travelmate_presentation::{AppState, ChatRepl, Cli, Command, ConsoleTurnPrinter, run_server};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are written on exit
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    info!("Starting TravelMate");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate()?;

    match cli.command.clone() {
        Command::Serve { bind } => serve(&config, bind).await,
        Command::Chat {
            relay_url,
            quiet,
            no_greeting,
        } => chat(&config, relay_url, quiet, no_greeting).await,
        Command::Ask {
            question,
            relay_url,
        } => ask(&config, &question, relay_url).await,
        Command::Config => {
            let path = (!cli.no_config).then_some(cli.config.as_ref()).flatten();
            ConfigLoader::print_config_sources(path);
            println!();
            print!("{}", toml::to_string_pretty(&config.redacted())?);
            Ok(())
        }
    }
}

/// Initialize logging based on verbosity level, or `RUST_LOG` when no `-v` is given
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "travelmate.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

async fn serve(config: &FileConfig, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.relay.bind.clone());
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address: {}", bind))?;

    // === Dependency Injection ===
    let client = http_client()?;
    let upstream = Arc::new(GatewayUpstream::new(client, &config.upstream.url));
    info!(
        "Relaying to {} with model {}",
        upstream.url(),
        config.upstream.model
    );
    let credentials = Arc::new(EnvCredential::new(&config.upstream.credential_env));
    let mut relay = RelayChatUseCase::new(upstream, credentials, &config.upstream.model);
    if let Some(prompt) = &config.relay.system_prompt {
        relay = relay.with_system_prompt(prompt);
    }

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested");
        }
        trigger.cancel();
    });

    run_server(AppState::new(relay), addr, shutdown).await?;
    Ok(())
}

/// Open a chat session against the configured relay and store.
async fn start_session(
    config: &FileConfig,
    relay_url: Option<String>,
    greeting: bool,
) -> Result<(ChatSession, String)> {
    let relay_url = relay_url.unwrap_or_else(|| config.client.relay_url.clone());
    let client = http_client()?;

    let transport = Arc::new(
        HttpRelayTransport::new(client.clone(), &relay_url)
            .with_api_key(config.client.api_key.clone()),
    );
    let store: Arc<dyn ConversationStore> = match build_store(&config.store, &client) {
        Ok(store) => store,
        Err(e) => {
            warn!("Conversation store unavailable, continuing without it: {}", e);
            Arc::new(NoConversationStore)
        }
    };

    let mut options = SessionOptions::default().with_title(&config.store.title);
    if !greeting {
        options = options.without_greeting();
    }

    let session = ChatSession::start(transport, store, options).await;
    Ok((session, relay_url))
}

async fn chat(
    config: &FileConfig,
    relay_url: Option<String>,
    quiet: bool,
    no_greeting: bool,
) -> Result<()> {
    let greeting = config.client.greeting && !no_greeting;
    let (session, relay_url) = start_session(config, relay_url, greeting).await?;

    let history_file = config
        .client
        .history_file
        .as_ref()
        .map(PathBuf::from)
        .or_else(ChatRepl::default_history_path);

    let mut repl = ChatRepl::new(session, relay_url)
        .with_progress(config.client.show_progress && !quiet)
        .with_history_file(history_file);

    repl.run().await?;
    Ok(())
}

async fn ask(config: &FileConfig, question: &str, relay_url: Option<String>) -> Result<()> {
    let (mut session, _) = start_session(config, relay_url, config.client.greeting).await?;
    let printer = ConsoleTurnPrinter::new().with_progress(config.client.show_progress);

    let result = session.send(question, &printer).await;
    session.flush().await;

    match result {
        Ok(_) => Ok(()),
        Err(ChatSessionError::Failed(failure)) => bail!("{}", failure),
        Err(e) => Err(e.into()),
    }
}
