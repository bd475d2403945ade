use super::render;
use anyhow::Result;
use leafscan::history::HistorySummary;
use leafscan::App;
use serde_json::json;

pub fn execute(json: bool, limit: Option<usize>) -> Result<()> {
    let app = App::open()?;
    let records = app.history.load();
    let summary = HistorySummary::of(&records);
    let shown = &records[..limit.unwrap_or(records.len()).min(records.len())];

    if json {
        let output = json!({
            "records": shown,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render::history(shown, summary));
    }
    Ok(())
}
