use anyhow::Result;
use serde_json::json;

const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn execute(json: bool) -> Result<()> {
    if json {
        let version_info = json!({
            "leafscan": CORE_VERSION,
            "inference_host": leafscan::inference::DEFAULT_BASE_URL,
        });
        println!("{}", serde_json::to_string_pretty(&version_info)?);
    } else {
        println!("leafscan {}", CORE_VERSION);
    }
    Ok(())
}
