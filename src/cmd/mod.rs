//! Subcommand handlers.

pub mod inspect;
pub mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};

use magtext::Config;

/// Global options that adjust the loaded configuration.
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub library: Option<PathBuf>,
    pub fallback: Option<char>,
}

impl Overrides {
    /// Load the configuration file (explicit or default) and apply flags.
    pub fn load(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::load_default().context("failed to load user config")?,
        };
        if let Some(library) = &self.library {
            config.library_dir.clone_from(library);
        }
        if let Some(fallback) = self.fallback {
            config.fallback = fallback;
        }
        Ok(config)
    }
}
