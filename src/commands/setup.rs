//! Setup command - how to connect a Hugging Face account

use anyhow::Result;
use colored::*;
use leafscan::paths;
use leafscan::settings::Settings;

const SIGNUP_URL: &str = "https://huggingface.co/join";
const TOKENS_URL: &str = "https://huggingface.co/settings/tokens";

pub fn execute(write_config: bool) -> Result<()> {
    println!("{}", "Setup Wizard".bold());
    println!("\nGet real AI predictions by connecting to Hugging Face in just 3 steps:\n");
    println!("  1. Create free Hugging Face account");
    println!("     {}", SIGNUP_URL.underline());
    println!("  2. Get your API token");
    println!("     {}", TOKENS_URL.underline());
    println!("  3. Configure in settings");
    println!("     leafscan settings set --api-key <TOKEN> [--model <MODEL>]");

    if write_config {
        let path = paths::config_path();
        if path.exists() {
            println!("\nSettings file already exists: {}", path.display());
        } else {
            Settings::default().save_to(&path)?;
            println!("\n{} Wrote default settings to {}", "\u{2713}".green(), path.display());
        }
    }
    Ok(())
}
