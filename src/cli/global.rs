// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options for logging and configuration.
//!
//! # Option Precedence
//!
//! ```text
//! --config=FILE     ← Additional config file
//! --log-level=N     ← Console verbosity (0-6)
//! --log-file=FILE   ← Also log to FILE
//!
//! Precedence: CLI flags > env > --config > sketchbuild.toml > defaults
//! ```

use clap::Args;
use std::path::{Path, PathBuf};

use crate::cli::path_value;
use crate::config::loader::ConfigLoader;
use crate::error::Result;

/// Global options, independent of the mode.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to an additional TOML configuration file.
    #[arg(
        long = "config",
        value_name = "FILE",
        require_equals = true,
        value_parser = path_value
    )]
    pub config: Option<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        require_equals = true,
        value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(
        long = "log-file",
        value_name = "FILE",
        require_equals = true,
        value_parser = path_value
    )]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Converts command-line options to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<(&'static str, config::Value)> {
        let mut overrides: Vec<(&'static str, config::Value)> = Vec::new();

        if let Some(level) = self.log_level {
            overrides.push(("global.output_log_level", i64::from(level).into()));
        }

        if let Some(path) = given(self.log_file.as_deref()) {
            overrides.push(("global.log_file", path.display().to_string().into()));
        }

        overrides
    }

    /// Builds the layered loader for this invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be applied.
    pub fn config_loader(&self) -> Result<ConfigLoader> {
        let mut loader = ConfigLoader::new().add_toml_file_optional("sketchbuild.toml");
        if let Some(path) = given(self.config.as_deref()) {
            loader = loader.add_toml_file(path);
        }
        loader = loader.with_env_prefix("SKETCHBUILD");
        for (key, value) in self.to_config_overrides() {
            loader = loader.set(key, value)?;
        }
        Ok(loader)
    }
}

/// `--config=` and `--log-file=` with nothing after `=` count as not given.
fn given(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}
