use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use magtext::config::validate_target_name;
use magtext::{write_script, PlacementEngine};

use super::Overrides;

pub fn cmd_render(
    overrides: &Overrides,
    cellname: &str,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    // Reject a bad name before touching stdin or the library.
    validate_target_name(cellname)?;

    let engine = PlacementEngine::new(overrides.load()?)?;
    let message = read_message(input)?;

    // Buffer the whole script: a failed run writes nothing.
    let mut commands = Vec::new();
    let summary = engine.run(&message, cellname, &mut commands)?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_script(BufWriter::new(file), &commands)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {} commands to {}", commands.len(), path.display());
        }
        None => {
            write_script(io::stdout().lock(), &commands).context("failed to write script")?;
        }
    }

    info!(
        "Cursor finished at ({}, {})",
        summary.cursor.x, summary.cursor.y
    );
    Ok(())
}

/// Read the whole message. CRLF line endings count as one line break.
fn read_message(input: Option<&Path>) -> Result<String> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            buf
        }
    };
    Ok(raw.replace("\r\n", "\n"))
}
