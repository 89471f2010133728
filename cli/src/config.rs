//! Loader settings.
//!
//! Resolution order: built-in defaults, then an optional TOML file
//! (`--config` / `ADJGRAPH_CONFIG`), then command-line overrides. Every
//! source is validated against the same ranges.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

pub const MAX_VERTICES_MIN: usize = 1;
pub const MAX_VERTICES_MAX: usize = 10_000_000;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Field separator for CSV input.
    pub delimiter: char,
    /// Skip the first line of CSV input.
    pub has_header: bool,
    /// Loading aborts once the graph holds more vertices than this.
    pub max_vertices: usize,
    /// Default tracing filter when neither --verbose nor --quiet is given.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
            max_vertices: 100_000,
            log_level: "info".to_string(),
        }
    }
}

/// Command-line overrides. `None` / `false` leaves the setting alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub delimiter: Option<char>,
    pub no_header: bool,
    pub max_vertices: Option<usize>,
}

impl Settings {
    /// Defaults, or the given TOML file layered over them.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                Self::from_toml_str(&text)
                    .with_context(|| format!("loading config {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text).context("invalid TOML settings")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(d) = overrides.delimiter {
            self.delimiter = d;
        }
        if overrides.no_header {
            self.has_header = false;
        }
        if let Some(max) = overrides.max_vertices {
            self.max_vertices = max;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MAX_VERTICES_MIN..=MAX_VERTICES_MAX).contains(&self.max_vertices) {
            bail!(
                "max_vertices must be between {} and {}, got {}",
                MAX_VERTICES_MIN,
                MAX_VERTICES_MAX,
                self.max_vertices
            );
        }
        if matches!(self.delimiter, '"' | '\n' | '\r') {
            bail!("delimiter {:?} is not allowed", self.delimiter);
        }
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            bail!(
                "log_level '{}' is invalid; use one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            );
        }
        Ok(())
    }
}
