use super::render;
use anyhow::Result;
use leafscan::App;

/// Show the last diagnosis (or the placeholder before the first scan)
pub fn execute(json: bool) -> Result<()> {
    let app = App::open()?;
    let result = app.current.get_or_awaiting(&app.settings.sensor);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render::diagnosis(&result));
    }
    Ok(())
}
