//! Scan command - capture a leaf image and diagnose it

use super::render;
use anyhow::{bail, Context, Result};
use colored::*;
use leafscan::diagnosis::DegradeReason;
use leafscan::{App, CaptureRequest, Outcome};
use serde_json::json;
use std::fs;
use std::path::Path;

pub fn execute(image: &Path, crop: Option<&str>, json: bool) -> Result<()> {
    let app = App::open()?;
    let crop = app.settings.capture.resolve_crop(crop)?;

    let bytes = fs::read(image).with_context(|| format!("Failed to read image {:?}", image))?;
    if bytes.is_empty() {
        bail!("Image file {:?} is empty", image);
    }

    if !json {
        if !app.config.is_configured() {
            print_config_banner();
        }
        println!("🔍 Analyzing Image... Please wait...\n");
    }

    let request = CaptureRequest {
        image: bytes,
        crop,
        sensors: app.settings.sensor,
        image_reference: Some(image.display().to_string()),
    };

    let diagnoser = app.diagnoser()?;
    let outcome = diagnoser.diagnose(&request)?;

    if let Some(e) = outcome.upstream_error() {
        eprintln!("{} {}", "⚠️  Prediction error:".yellow(), e);
    }

    app.current.replace(outcome.diagnosis());

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome_json(&outcome))?);
    } else {
        print!("{}", render::diagnosis(outcome.diagnosis()));
    }

    Ok(())
}

fn print_config_banner() {
    println!(
        "{}",
        "ℹ️  Configure Hugging Face for real AI predictions".bold()
    );
    println!("   Currently using mock predictions. Run `leafscan setup` to connect.\n");
}

fn outcome_json(outcome: &Outcome) -> serde_json::Value {
    let (status, reason) = match outcome.degrade_reason() {
        None => ("ok", None),
        Some(DegradeReason::Unconfigured) => ("degraded", Some("unconfigured".to_string())),
        Some(DegradeReason::Upstream(e)) => ("degraded", Some(e.to_string())),
    };
    json!({
        "status": status,
        "reason": reason,
        "result": outcome.diagnosis(),
    })
}
