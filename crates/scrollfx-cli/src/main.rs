use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrollfx_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "scrollfx")]
#[command(author, version, about = "Preview and simulate scroll-driven page animations")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/scrollfx/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive terminal preview
    Run,
    /// Replay a scenario file on a virtual clock and print samples
    Simulate {
        /// Scenario file (TOML)
        path: PathBuf,
        /// Print one JSON object per sample
        #[arg(long)]
        json: bool,
        /// Pace output at wall-clock speed
        #[arg(long)]
        realtime: bool,
    },
    /// Print the pinned-stack scale table
    Stack {
        /// Number of stacked items
        #[arg(short = 'n', long, default_value_t = 3)]
        items: usize,
        /// Progress samples between 0 and 1
        #[arg(short = 's', long, default_value_t = 4)]
        steps: usize,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(short = 'f', long)]
        force: bool,
    },
}

fn init_logging(default_level: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;

    // The TUI owns the terminal; only log there when explicitly asked to
    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    if !interactive || std::env::var_os("RUST_LOG").is_some() {
        init_logging(&config.general.log_level);
    }

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Simulate {
            path,
            json,
            realtime,
        }) => commands::simulate::run(&config, &path, json, realtime).await,
        Some(Commands::Stack { items, steps }) => commands::stack::run(&config, items, steps),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::path(&config_path),
            ConfigAction::Init { force } => commands::config::init(&config_path, force),
        },
    }
}
