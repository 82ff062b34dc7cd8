//! Arcana - Tarot Readings from the Command Line
//!
//! Runs one user action against the tarot API and writes the rendered markup
//! to stdout (or a file).
//!
//! # Usage
//!
//! ```bash
//! # Card of the day
//! arcana daily
//!
//! # Celtic cross into a file
//! arcana --out reading.html spread celtic
//!
//! # Ask a question
//! arcana ask "Vou mudar de emprego?"
//!
//! # Search meanings against another backend
//! arcana --base-url http://tarot.local:5000 search amor
//!
//! # Verbose logging
//! RUST_LOG=debug arcana card ar01
//! ```

mod surface;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use arcana_core::{
    default_config_path, load_config_from_path, Action, ActionOutcome, ConfigOverrides,
    Controller, HttpBackend, SpreadKind, ViewModelMapper,
};

use surface::StdoutSurface;

/// Arcana - tarot reading client
#[derive(Parser, Debug)]
#[command(name = "arcana")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "ARCANA_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Backend origin (overrides config and ARCANA_BASE_URL)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Characters of meaning shown per search result
    #[arg(long, value_name = "CHARS")]
    preview_chars: Option<usize>,

    /// Write markup to this file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "ARCANA_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(ref url) = self.base_url {
            overrides = overrides.with_base_url(url.clone());
        }
        if let Some(secs) = self.timeout_secs {
            overrides = overrides.with_timeout_secs(secs);
        }
        if let Some(chars) = self.preview_chars {
            overrides = overrides.with_preview_chars(chars);
        }
        overrides
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw the card of the day
    Daily,
    /// Draw a spread (three, love, celtic)
    Spread {
        /// Spread to draw
        kind: SpreadKind,
    },
    /// Ask a question
    Ask {
        /// The question
        question: String,
    },
    /// Search card meanings
    Search {
        /// Search term; empty shows suggestions
        #[arg(default_value = "")]
        query: String,
    },
    /// Show one card in detail
    Card {
        /// Card identifier, e.g. ar01
        id: String,
    },
    /// Check the backend's health
    Status,
    /// Reset the search region
    Clear,
}

impl Command {
    fn into_action(self) -> Action {
        match self {
            Self::Daily => Action::LoadSpread(SpreadKind::Daily),
            Self::Spread { kind } => Action::LoadSpread(kind),
            Self::Ask { question } => Action::Ask { question },
            Self::Search { query } => Action::Search { query },
            Self::Card { id } => Action::ShowCard { id },
            Self::Status => Action::Status,
            Self::Clear => Action::ClearSearch,
        }
    }
}

/// Initialize logging with the specified level
///
/// Logs go to stderr; stdout carries the markup.
fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("arcana={level},arcana_core={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level);

    let config_path = args.config.clone().or_else(default_config_path);
    let mut config = load_config_from_path(config_path).context("Failed to load configuration")?;

    args.overrides().apply(&mut config);
    config.validate().context("Invalid configuration")?;

    info!(
        base_url = %config.base_url,
        source = %config.source(),
        "Configuration loaded"
    );

    let backend = HttpBackend::from_config(&config).context("Failed to create HTTP backend")?;
    let controller = Controller::new(
        backend,
        StdoutSurface::new(args.out.clone()),
        ViewModelMapper::new(config.preview_chars),
    );

    let action = args.command.into_action();
    let outcome = tokio::select! {
        outcome = controller.dispatch(&action) => outcome,
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl-C")?;
            warn!("Interrupted");
            return Ok(());
        }
    };

    controller.surface().flush().await?;

    match outcome {
        ActionOutcome::Rendered | ActionOutcome::Completed | ActionOutcome::Superseded => Ok(()),
        ActionOutcome::Rejected(e) => anyhow::bail!("{e}"),
        ActionOutcome::Failed(reason) => anyhow::bail!("{reason}"),
    }
}
