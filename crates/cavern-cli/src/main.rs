//! Console harness for Cavern adventures.

mod commands;
mod console;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use cavern_engine::GameConfig;

#[derive(Parser)]
#[command(
    name = "cavern",
    about = "Cavern: play and check text adventure scripts",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an adventure
    Play {
        /// Adventure script
        file: PathBuf,

        /// Read commands from this file instead of the keyboard
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// RNG seed for reproducible `random` conditions
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many turns
        #[arg(long)]
        max_turns: Option<u64>,

        /// Do not describe the start room before the first command
        #[arg(long)]
        no_look: bool,
    },

    /// Compile a script and report diagnostics
    Check {
        /// Adventure script
        file: PathBuf,
    },

    /// Show the rooms, items, and rules of a compiled script
    Inspect {
        /// Adventure script
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cavern=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            file,
            script,
            seed,
            max_turns,
            no_look,
        } => {
            let mut config = GameConfig::default().with_look_on_start(!no_look);
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            if let Some(max_turns) = max_turns {
                config = config.with_max_turns(max_turns);
            }
            commands::play::run(&file, script.as_deref(), config)
        }
        Commands::Check { file } => commands::check::run(&file),
        Commands::Inspect { file } => commands::inspect::run(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
