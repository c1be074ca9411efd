//! CLI entrypoint for chef-chat
//!
//! Wires the layers together: configuration, the HTTP transport, the
//! favorites file and the chat session, then runs either a single question
//! or the interactive REPL.

use anyhow::{Result, anyhow, bail};
use chef_application::{
    ChatSession, ConversationLogger, FavoritesContext, NoConversationLogger, NoFavorites,
};
use chef_infrastructure::{
    ConfigLoader, EnvCredentialProvider, FileConfig, FileFavoritesContext, HttpChatTransport,
    JsonlConversationLogger, config::expand_home,
};
use chef_presentation::{
    ChatRepl, Cli, ConsoleFormatter, ConsoleObserver, ReplConfig, TranscriptObserver,
};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    if let Some(model) = &cli.model {
        config.generation.model = model.clone();
    }
    if let Err(e) = config.validate() {
        bail!("invalid configuration: {}", e);
    }

    info!("Starting chef-chat (model {})", config.generation.model);

    let session = Arc::new(build_session(&config)?);

    match cli.question {
        Some(question) => Ok(ask_once(&session, &question, cli.html, !cli.quiet).await),
        None => {
            let repl_config = ReplConfig {
                show_progress: config.repl.show_progress && !cli.quiet,
                history_file: config.repl.history_file.as_deref().map(expand_home),
            };
            ChatRepl::new(session, repl_config).run().await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// === Dependency Injection ===
fn build_session(config: &FileConfig) -> Result<ChatSession> {
    let transport = HttpChatTransport::new(
        config.api.endpoint.clone(),
        config.api.connect_timeout(),
        config.api.read_timeout(),
    )?;
    info!("Chat endpoint: {}", transport.endpoint());

    let credentials = EnvCredentialProvider::new(config.api.api_key_env.clone())
        .with_fallback(config.api.api_key.clone());
    debug!("API key read from ${}", credentials.env_var());

    let favorites: Arc<dyn FavoritesContext> = match config.favorites.resolved_path() {
        Some(path) => {
            info!("Favorites file: {}", path.display());
            Arc::new(FileFavoritesContext::new(path))
        }
        None => Arc::new(NoFavorites),
    };

    let conversation_logger: Arc<dyn ConversationLogger> =
        match config.logging.conversation_log_path() {
            Some(path) => match JsonlConversationLogger::create(&path) {
                Ok(logger) => {
                    info!("Conversation log: {}", logger.path().display());
                    Arc::new(logger)
                }
                Err(e) => {
                    warn!("Conversation log disabled ({}): {}", path.display(), e);
                    Arc::new(NoConversationLogger)
                }
            },
            None => Arc::new(NoConversationLogger),
        };

    Ok(ChatSession::new(
        Arc::new(transport),
        favorites,
        Arc::new(credentials),
        config.generation.to_params(),
    )
    .with_conversation_logger(conversation_logger))
}

/// Single question mode: stream one answer and report success as the exit code.
async fn ask_once(
    session: &ChatSession,
    question: &str,
    html: bool,
    show_progress: bool,
) -> ExitCode {
    let result = if html {
        let observer = TranscriptObserver::new();
        let result = session.ask(question, &observer).await;
        println!("{}", observer.snapshot().as_str());
        result
    } else {
        let observer = ConsoleObserver::new(show_progress).with_echo(true);
        session.ask(question, &observer).await
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            // Turn failures were already shown by the observer.
            if e.is_rejection() {
                eprintln!("{}", ConsoleFormatter::error_line(&e));
            }
            ExitCode::FAILURE
        }
    }
}
