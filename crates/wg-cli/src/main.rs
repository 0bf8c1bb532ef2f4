//! `wg`: play Wegweiser stories in the terminal and check them while writing.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::PlayConfig;

#[derive(Parser)]
#[command(
    name = "wg",
    about = "Wegweiser: branching stories with items and dice",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the stories in a stories directory
    List {
        /// Stories directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Include work-in-progress stories
        #[arg(short, long)]
        all: bool,
    },

    /// Check stories for broken links and authoring mistakes
    Check {
        /// Story id (default: every story in the catalog)
        story: Option<String>,

        /// Stories directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Print a story's node graph by distance from the start
    Graph {
        /// Story id
        story: String,

        /// Stories directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Play a story, continuing from its save slot
    Play {
        /// Story id
        story: String,

        /// Stories directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Save directory (default: <dir>/.saves)
        #[arg(long)]
        saves: Option<PathBuf>,

        /// RNG seed for reproducible rolls
        #[arg(long)]
        seed: Option<u64>,

        /// Ignore the save slot and start over
        #[arg(long)]
        new: bool,
    },

    /// Delete a story's save slot
    Reset {
        /// Story id
        story: String,

        /// Stories directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Save directory (default: <dir>/.saves)
        #[arg(long)]
        saves: Option<PathBuf>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List { dir, all } => commands::list::run(&commands::store_config(dir, None), all),
        Commands::Check { story, dir } => {
            commands::check::run(&commands::store_config(dir, None), story.as_deref())
        }
        Commands::Graph { story, dir } => {
            commands::graph::run(&commands::store_config(dir, None), &story)
        }
        Commands::Play {
            story,
            dir,
            saves,
            seed,
            new,
        } => {
            let mut play = PlayConfig::default().with_new_game(new);
            if let Some(seed) = seed {
                play = play.with_seed(seed);
            }
            commands::play::run(&commands::store_config(dir, saves), &story, &play)
        }
        Commands::Reset { story, dir, saves } => {
            commands::reset::run(&commands::store_config(dir, saves), &story)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
