//! Settings command - hosted inference credentials
//!
//! The API key is stored in cleartext under `~/.leafscan/storage/`
//! (owner-only permissions). It is never printed in full.

use anyhow::{bail, Result};
use colored::*;
use leafscan::config::DEFAULT_MODEL_ID;
use leafscan::{App, ServiceConfig};
use serde_json::json;
use std::io::{self, Write};

/// Settings CLI subcommands
#[derive(Debug, Clone, clap::Subcommand)]
pub enum SettingsCommands {
    /// Show the stored credential (masked) and model
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Save credential and model, replacing any previous settings
    Set {
        /// Hugging Face API token (prompted for if omitted)
        #[arg(long)]
        api_key: Option<String>,

        /// Model identifier (defaults to nateraw/food)
        #[arg(long)]
        model: Option<String>,
    },

    /// Remove stored credentials and return to mock predictions
    Clear,
}

/// Execute settings command from CLI
pub fn execute_cli(command: Option<SettingsCommands>) -> Result<()> {
    match command {
        Some(cmd) => execute(cmd),
        None => show(false), // Bare `leafscan settings` shows current settings
    }
}

pub fn execute(command: SettingsCommands) -> Result<()> {
    match command {
        SettingsCommands::Show { json } => show(json),
        SettingsCommands::Set { api_key, model } => set(api_key, model.as_deref()),
        SettingsCommands::Clear => clear(),
    }
}

fn show(json: bool) -> Result<()> {
    let app = App::open()?;
    let config = app.config.get();

    if json {
        let output = match &config {
            Some(c) => json!({
                "configured": true,
                "api_key": c.masked_credential(),
                "model_id": c.model_id,
                "base_url": app.settings.inference.base_url,
            }),
            None => json!({
                "configured": false,
                "base_url": app.settings.inference.base_url,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match config {
        Some(c) => {
            println!("Hugging Face: {} configured", "\u{2713}".green());
            println!("  API key:  {}", c.masked_credential());
            println!("  Model:    {}", c.model_id);
            println!("  Endpoint: {}", app.settings.inference.base_url);
        }
        None => {
            println!("Hugging Face: {} not configured", "\u{2717}".red());
            println!("  Currently using mock predictions.");
            println!("\nRun `leafscan setup` for instructions.");
        }
    }
    Ok(())
}

fn set(api_key: Option<String>, model: Option<&str>) -> Result<()> {
    let api_key = match api_key {
        Some(key) => key,
        None => prompt("API key (hf_...): ")?,
    };

    let Some(config) = ServiceConfig::from_input(&api_key, model) else {
        bail!("API key cannot be empty");
    };

    let app = App::open()?;
    app.config.set(&config)?;
    log::info!("Saved service config for model {}", config.model_id);

    println!("{} Settings saved", "\u{2713}".green());
    println!("  Model: {}", config.model_id);
    if config.model_id == DEFAULT_MODEL_ID && model.map_or(true, |m| m.trim().is_empty()) {
        println!("  (default model - pass --model to choose another)");
    }
    Ok(())
}

fn clear() -> Result<()> {
    let app = App::open()?;
    app.config.clear()?;
    println!("Settings cleared. Predictions will use the mock classifier.");
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
