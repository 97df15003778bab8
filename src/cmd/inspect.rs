use anyhow::Result;

use magtext::PlacementEngine;

use super::Overrides;

pub fn cmd_inspect(overrides: &Overrides, text: &str) -> Result<()> {
    let engine = PlacementEngine::new(overrides.load()?)?;
    let resolutions = engine.inspect(text)?;
    println!("{}", serde_json::to_string_pretty(&resolutions)?);
    Ok(())
}
