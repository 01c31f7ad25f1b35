use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "puppy-cli", version, about = "Desktop Puppy CLI")]
struct Cli {
    /// Log state-machine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log everything, including every queued event
    #[arg(long, global = true)]
    debug: bool,

    /// Settings file to use instead of ~/.config/desktop-puppy/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session with the puppy
    Run {
        /// Fixed seed for petting thresholds
        #[arg(long)]
        seed: Option<u64>,
        /// Print every event as a JSON line instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the time-of-day activity plan
    Schedule {
        /// Only show the activity for this hour (0-23)
        #[arg(long)]
        hour: Option<u32>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

fn init_tracing(verbose: bool, debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("PUPPY_LOG")
                .unwrap_or_default()
                .add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.debug);

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Run { seed, json } => commands::run::run(config_path, seed, json),
        Commands::Schedule { hour } => commands::schedule::run(hour),
        Commands::Config { action } => commands::config::run(action, config_path),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "puppy-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
