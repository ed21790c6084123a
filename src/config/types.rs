// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for sketchbuild.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, SketchConfig, ToolchainConfig
//! ToolchainConfig: argv templates for preprocess / build / upload
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Console log level.
    pub output_log_level: LogLevel,
    /// File log level.
    pub file_log_level: LogLevel,
    /// Log file path, no file logging when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Sketch layout rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SketchConfig {
    /// Extension of the main source file, without the dot.
    pub extension: String,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            extension: "pde".to_string(),
        }
    }
}

impl SketchConfig {
    /// Checks the extension is usable for deriving main source paths.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the extension is empty or
    /// contains a dot or path separator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ext = self.extension.as_str();
        if ext.is_empty() || ext.contains(['.', '/', '\\']) {
            return Err(ConfigError::InvalidValue {
                section: "sketch".to_string(),
                key: "extension".to_string(),
                message: format!("expected a bare extension such as 'pde', got '{ext}'"),
            });
        }
        Ok(())
    }
}

/// Command templates for the external toolchain.
///
/// Each template is an argv vector; `{placeholder}` segments are expanded
/// per invocation (see [`crate::toolchain`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Preprocess command, its stdout becomes the preprocessed source.
    pub preprocess: Vec<String>,
    /// Compile command.
    pub build: Vec<String>,
    /// Upload command.
    pub upload: Vec<String>,
    /// Extension of the file the preprocess stage writes.
    pub preprocessed_extension: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        let argv = |args: &[&str]| args.iter().map(ToString::to_string).collect();
        Self {
            preprocess: argv(&[
                "arduino-cli",
                "compile",
                "--fqbn",
                "{target}",
                "--preprocess",
                "{sketch}",
            ]),
            build: argv(&[
                "arduino-cli",
                "compile",
                "--fqbn",
                "{target}",
                "--output-dir",
                "{output}",
                "{sketch}",
            ]),
            upload: argv(&[
                "arduino-cli",
                "upload",
                "--fqbn",
                "{target}",
                "--port",
                "{port}",
                "--input-dir",
                "{output}",
                "{sketch}",
            ]),
            preprocessed_extension: "cpp".to_string(),
        }
    }
}
