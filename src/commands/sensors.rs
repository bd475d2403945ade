use super::render;
use anyhow::Result;
use leafscan::App;

pub fn execute(json: bool) -> Result<()> {
    let app = App::open()?;
    let snapshot = app.settings.sensor;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render::sensors(&snapshot));
    }
    Ok(())
}
