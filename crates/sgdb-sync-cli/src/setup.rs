//! Interactive first-run configuration

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context};
use sgdb_sync_core::Settings;

const API_KEY_PROMPT: &str =
    "SteamGridDB API key (from https://www.steamgriddb.com/profile/preferences/api): ";

/// Prompt for the API key and save it to `path`
///
/// An empty answer keeps an existing key. With no existing key, an empty
/// answer aborts setup.
pub fn run_setup<R, W>(
    mut settings: Settings,
    path: &Path,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Settings>
where
    R: BufRead,
    W: Write,
{
    if settings.has_api_key() {
        writeln!(output, "Press Enter to keep the current API key.")?;
    } else {
        writeln!(output, "First time setup - please provide your configuration:")?;
        writeln!(output)?;
    }
    write!(output, "{}", API_KEY_PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read API key")?;
    let api_key = line.trim();

    if api_key.is_empty() {
        if settings.has_api_key() {
            return Ok(settings);
        }
        bail!("API key is required");
    }

    settings.api_key = api_key.to_string();
    settings
        .save(path)
        .with_context(|| format!("Failed to save configuration to {}", path.display()))?;

    writeln!(output)?;
    writeln!(output, "✓ Configuration saved to {}", path.display())?;
    Ok(settings)
}
