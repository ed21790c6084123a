// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for sketchbuild.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. sketchbuild.toml (cwd, optional)
//! 3. --config FILE
//! 4. SKETCHBUILD_* env vars
//! 5. CLI overrides (--log-level, --log-file)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! SKETCHBUILD_SKETCH__EXTENSION=ino        → sketch.extension = "ino"
//! SKETCHBUILD_GLOBAL__OUTPUT_LOG_LEVEL=4   → global.output_log_level = 4
//! ```
//!
//! # Example
//!
//! ```toml
//! [sketch]
//! extension = "ino"
//!
//! [toolchain]
//! build = ["arduino-cli", "compile", "--fqbn", "{target}", "--output-dir", "{output}", "{sketch}"]
//! ```
//!
//! Preferences (`serial.port`, `target`) are not configuration; they live in
//! the preference store, see [`crate::prefs`].

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

use loader::ConfigLoader;
use types::{GlobalConfig, SketchConfig, ToolchainConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Sketch layout.
    pub sketch: SketchConfig,
    /// External toolchain commands.
    pub toolchain: ToolchainConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sketchbuild::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("sketchbuild.toml")
    ///     .with_env_prefix("SKETCHBUILD")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate values that deserialization alone cannot check.
    ///
    /// # Errors
    ///
    /// Returns an error if the sketch extension is unusable.
    pub fn validate(&self) -> Result<()> {
        self.sketch.validate()?;
        Ok(())
    }
}
