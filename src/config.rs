//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a fovea.toml, and if present we load settings from there.
//! This provides the heading marker, scroll context and log verbosity.

use crate::error::{Error, Result};
use facet::Facet;
use std::fs;
use std::io;
use std::path::Path;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "fovea.toml";

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from fovea.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "#".to_string())]
    /// Character whose repetition at line start marks a heading's depth.
    pub marker: String,
    #[facet(default = 3)]
    /// Rows of context kept above and below the focus when scrolling.
    pub scroll_padding: usize,
    #[facet(default = "warn".to_string())]
    /// Default log level, overridden by `RUST_LOG`.
    pub log_level: String,
}

impl Config {
    /// Load configuration from fovea.toml in the working directory if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not valid configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from `path`, using defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file exists but cannot be read as UTF-8 text, and
    /// [`Error::Config`] if it is not valid configuration.
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::parse(""),
            Err(source) => Err(Error::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse configuration from TOML text; empty text yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not valid configuration.
    pub fn parse(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// The configured marker as a single character.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Marker`] unless the marker is exactly one non-whitespace character.
    pub fn marker_char(&self) -> Result<char> {
        let mut chars = self.marker.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => Ok(c),
            _ => Err(Error::Marker(self.marker.clone())),
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
