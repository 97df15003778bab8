//! Configuration loaded from `~/.config/magtext/config.toml`.
//!
//! Every field is optional in the file; missing fields take the defaults
//! for the sky130 glyph library:
//!
//! ```toml
//! library_dir = "libraries/sky130_pschulz_xx_hd/mag"
//! layer = "metal1"
//! fallback = "?"
//! baseline_skip = 400
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Directory holding one `.mag` document per glyph.
pub const DEFAULT_LIBRARY_DIR: &str = "libraries/sky130_pschulz_xx_hd/mag";

/// Settings shared by the cell locator and the placement engine.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Lookup store for glyph cell documents.
    pub library_dir: PathBuf,
    /// Search path emitted in the `path` command. Derived from
    /// `library_dir` when unset.
    pub search_path: Option<String>,
    pub cell_prefix: String,
    /// File extension of cell documents, without the dot.
    pub extension: String,
    /// The only layer whose rectangles contribute to the extent.
    pub layer: String,
    /// Glyph used when a character has no cell document.
    pub fallback: char,
    /// Vertical distance between successive lines.
    pub baseline_skip: i64,
    /// Multiplier applied to the right edge to get the advance.
    pub advance_scale: i64,
    /// Directory named in the archive command.
    pub gds_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_dir: PathBuf::from(DEFAULT_LIBRARY_DIR),
            search_path: None,
            cell_prefix: "font_".to_string(),
            extension: "mag".to_string(),
            layer: "metal1".to_string(),
            fallback: '?',
            baseline_skip: 400,
            advance_scale: 2,
            gds_dir: "gds".to_string(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("invalid TOML in {}: {msg}", path.display())),
            other => other,
        })
    }

    /// Load the user configuration file, or defaults when it doesn't exist.
    pub fn load_default() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Search path for the `path` command: `.` followed by the library.
    pub fn search_path(&self) -> String {
        if let Some(explicit) = &self.search_path {
            return explicit.clone();
        }
        let lib = self.library_dir.to_string_lossy();
        format!(".:{}", lib.trim_end_matches('/'))
    }

    /// Reject settings that would produce a broken script.
    pub fn validate(&self) -> Result<()> {
        if self.layer.trim().is_empty() {
            return Err(Error::Config("layer name must not be empty".to_string()));
        }
        if self.fallback == '\n' {
            return Err(Error::Config("fallback glyph cannot be a line break".to_string()));
        }
        if self.baseline_skip < 0 {
            return Err(Error::Config(format!(
                "baseline_skip must be non-negative, got {}",
                self.baseline_skip
            )));
        }
        Ok(())
    }
}

/// Return the path to the user config file.
fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("magtext")
        .join("config.toml")
}

/// Validate the name the layout is archived under.
///
/// The name becomes part of `gds/<name>.gds`, so it must be non-empty and
/// free of whitespace.
pub fn validate_target_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::Config("cell name required".to_string()));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(Error::Config(format!(
            "cell name {name:?} must not contain whitespace"
        )));
    }
    Ok(())
}
