use clap::{Parser, Subcommand};
use itinerary_core::model::ViewMode;
use tracing_subscriber::EnvFilter;

mod commands;
mod common;
mod render;

#[derive(Parser)]
#[command(name = "itinerary", version, about = "Day-by-day trip planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trip management
    Trip {
        #[command(subcommand)]
        action: commands::trip::TripAction,
    },
    /// Days of the current trip
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Places on the current day
    Place {
        #[command(subcommand)]
        action: commands::place::PlaceAction,
    },
    /// Transit legs on the current day
    Transit {
        #[command(subcommand)]
        action: commands::transit::TransitAction,
    },
    /// Switch the day layout (detail, compact, map)
    View { mode: ViewMode },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Stored data maintenance
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ITINERARY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Trip { action } => commands::trip::run(action),
        Commands::Day { action } => commands::day::run(action),
        Commands::Place { action } => commands::place::run(action),
        Commands::Transit { action } => commands::transit::run(action),
        Commands::View { mode } => commands::view::run(mode),
        Commands::Config { action } => commands::config::run(action),
        Commands::Data { action } => commands::data::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
