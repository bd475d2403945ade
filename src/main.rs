use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Leaf disease diagnosis from a photo", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnose a leaf photo
    Scan {
        /// Image file to analyze
        image: PathBuf,

        /// Crop in the photo (defaults to [capture] default_crop)
        #[arg(long)]
        crop: Option<String>,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show field sensor readings
    Sensors {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the last diagnosis
    Result {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show past diagnoses, newest first
    History {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,

        /// Show at most N records
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Manage Hugging Face credentials
    Settings {
        #[command(subcommand)]
        command: Option<commands::settings::SettingsCommands>,
    },

    /// How to connect a Hugging Face account
    Setup {
        /// Also write a default config.toml if none exists
        #[arg(long)]
        write_config: bool,
    },

    /// Show version information
    Version {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    leafscan::logging::init(cli.verbose);

    match cli.command {
        Commands::Scan { image, crop, json } => {
            commands::scan::execute(&image, crop.as_deref(), json)?;
        }
        Commands::Sensors { json } => {
            commands::sensors::execute(json)?;
        }
        Commands::Result { json } => {
            commands::result::execute(json)?;
        }
        Commands::History { json, limit } => {
            commands::history::execute(json, limit)?;
        }
        Commands::Settings { command } => {
            commands::settings::execute_cli(command)?;
        }
        Commands::Setup { write_config } => {
            commands::setup::execute(write_config)?;
        }
        Commands::Version { json } => {
            commands::version::execute(json)?;
        }
    }

    Ok(())
}
