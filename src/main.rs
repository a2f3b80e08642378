use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "trailpoints")]
#[command(about = "Progression and rewards engine for the Trailpoints fitness companion")]
#[command(version)]
struct Cli {
    /// Path to the snapshot file (defaults to ~/.trailpoints/progress.json)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level, XP, points, and streak
    Status,

    /// Record a completed activity
    Activity {
        /// Activity type (running, cycling, walking, ...)
        activity_type: String,

        /// Distance in kilometers
        distance: f64,

        /// Duration in seconds
        duration: u64,
    },

    /// Show today's challenges, or complete one
    Challenges {
        /// Complete the challenge with this id
        #[arg(long)]
        complete: Option<String>,
    },

    /// Browse the rewards shop, or buy a reward
    Shop {
        /// Buy the reward with this id
        #[arg(long)]
        buy: Option<String>,
    },

    /// List achievements and their progress
    Achievements,

    /// Show the leaderboard standings
    Leaderboard,

    /// Share the latest activity with your crew
    Share,

    /// Wipe all progression back to defaults
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let mut store = cli::open_store(cli.data);

    match cli.command {
        Some(Commands::Activity {
            activity_type,
            distance,
            duration,
        }) => {
            cli::activity::activity_command(&mut store, &activity_type, distance, duration);
        }
        Some(Commands::Challenges { complete }) => {
            cli::challenges::challenges_command(&mut store, complete);
        }
        Some(Commands::Shop { buy }) => {
            cli::shop::shop_command(&mut store, buy);
        }
        Some(Commands::Achievements) => {
            cli::achievements::achievements_command(&store);
        }
        Some(Commands::Leaderboard) => {
            cli::leaderboard::leaderboard_command();
        }
        Some(Commands::Share) => {
            cli::activity::share_command(&mut store);
        }
        Some(Commands::Reset { force }) => {
            cli::reset::reset_command(&mut store, force)?;
        }
        Some(Commands::Status) | None => {
            cli::status::status_command(&store);
        }
    }

    Ok(())
}
