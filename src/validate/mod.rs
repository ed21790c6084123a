// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mode validation.
//!
//! ```text
//! Mode::pipeline() == None ----------------------------> usage, exit 0
//!        |
//!        v  PipelineMode
//! 2. --output given?                     MissingOutput
//! 3. output dir exists / created?        CreateOutput
//! 4. prefs.init(--preferences)           Preferences
//! 5. Upload: --port | serial.port pref   NoSerialPort    (warn on fallback)
//! 6. Upload: --target | target pref      NoTarget        (warn on fallback)
//! 7. --sketch given?                     MissingSketch
//! 8. output != <sketch>/<name>.<ext>     PathCollision
//! 9. main file ends with .<ext>          BadExtension
//!        |
//!        v
//!   BuildRequest (immutable)
//! ```
//!
//! Checks run strictly in this order and the first failure wins. Steps 3-6
//! have side effects (directory creation, preference writes) that are not
//! rolled back when a later step fails.
//!
//! Empty values (`--output=`) arrive here as empty paths. An empty output
//! cannot be created, an empty sketch is no sketch, and an empty preferences
//! path means the default file.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::PipelineMode;
use crate::cli::sketch::SketchArgs;
use crate::config::types::SketchConfig;
use crate::error::ValidationError;
use crate::prefs::{PreferenceStore, SERIAL_PORT_KEY, TARGET_KEY};
use crate::report::DiagnosticReporter;

/// A validated build request.
///
/// Only [`ModeValidator::validate`] constructs it; all paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    sketch_folder: PathBuf,
    main_file: PathBuf,
    output: PathBuf,
    port: Option<String>,
    target: Option<String>,
    preferences: Option<PathBuf>,
}

impl BuildRequest {
    /// The sketch folder.
    #[must_use]
    pub fn sketch_folder(&self) -> &Path {
        &self.sketch_folder
    }

    /// The main source file, `<folder>/<folder-name>.<ext>`.
    #[must_use]
    pub fn main_file(&self) -> &Path {
        &self.main_file
    }

    /// The sketch name, i.e. the folder name.
    #[must_use]
    pub fn sketch_name(&self) -> String {
        self.sketch_folder.file_name().map_or_else(
            || "sketch".to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    /// The output directory. It exists once validation succeeded.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Serial port. Always set for uploads.
    #[must_use]
    pub fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    /// Target board. Always set for uploads.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Preferences file given on the command line.
    #[must_use]
    pub fn preferences(&self) -> Option<&Path> {
        self.preferences.as_deref()
    }
}

/// Derives `<folder>/<folder-name>.<extension>`.
///
/// A folder without a final name component (`/`, `..`) is returned as is,
/// which then fails the extension check.
#[must_use]
pub fn main_source_path(folder: &Path, extension: &str) -> PathBuf {
    folder.file_name().map_or_else(
        || folder.to_path_buf(),
        |name| {
            let mut file = OsString::from(name);
            file.push(".");
            file.push(extension);
            folder.join(file)
        },
    )
}

/// Case-insensitive check that `path` ends with `.<extension>`.
#[must_use]
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let suffix = format!(".{}", extension.to_lowercase());
    path.to_string_lossy().to_lowercase().ends_with(&suffix)
}

/// Cross-checks parsed options against the selected mode.
pub struct ModeValidator<'a, P: PreferenceStore + ?Sized> {
    sketch: &'a SketchConfig,
    prefs: &'a mut P,
}

impl<'a, P: PreferenceStore + ?Sized> ModeValidator<'a, P> {
    pub const fn new(sketch: &'a SketchConfig, prefs: &'a mut P) -> Self {
        Self { sketch, prefs }
    }

    /// Runs checks 2-9 for `mode`.
    ///
    /// Fallback warnings go to the reporter's stdout channel.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] hit, in check order.
    pub fn validate<O: Write, E: Write>(
        &mut self,
        mode: PipelineMode,
        args: &SketchArgs,
        reporter: &mut DiagnosticReporter<O, E>,
    ) -> Result<BuildRequest, ValidationError> {
        let output = args
            .output
            .as_deref()
            .ok_or(ValidationError::MissingOutput)?;

        ensure_output_dir(output)?;

        let preferences = non_empty_path(args.preferences.as_deref());
        self.prefs.init(preferences)?;

        let (port, target) = if mode == PipelineMode::Upload {
            let port = self.resolve_with_fallback(
                args.port.as_deref(),
                SERIAL_PORT_KEY,
                "serial port",
                ValidationError::NoSerialPort,
                reporter,
            )?;
            let target = self.resolve_with_fallback(
                args.target.as_deref(),
                TARGET_KEY,
                "target board",
                ValidationError::NoTarget,
                reporter,
            )?;
            (Some(port), Some(target))
        } else {
            (non_empty(args.port.as_deref()), non_empty(args.target.as_deref()))
        };

        let sketch =
            non_empty_path(args.sketch.as_deref()).ok_or(ValidationError::MissingSketch)?;
        let sketch_folder = absolute(sketch)?;
        let main_file = main_source_path(&sketch_folder, &self.sketch.extension);
        let output = absolute(output)?;
        debug!(main = %main_file.display(), output = %output.display(), "derived paths");

        if output.as_os_str().as_encoded_bytes() == main_file.as_os_str().as_encoded_bytes() {
            return Err(ValidationError::PathCollision);
        }

        if !has_extension(&main_file, &self.sketch.extension) {
            return Err(ValidationError::BadExtension {
                extension: self.sketch.extension.clone(),
            });
        }

        Ok(BuildRequest {
            sketch_folder,
            main_file,
            output,
            port,
            target,
            preferences: preferences.map(Path::to_path_buf),
        })
    }

    /// Uses `given`, else the stored preference (with a warning), and writes
    /// the result back under `key`.
    fn resolve_with_fallback<O: Write, E: Write>(
        &mut self,
        given: Option<&str>,
        key: &str,
        what: &str,
        missing: ValidationError,
        reporter: &mut DiagnosticReporter<O, E>,
    ) -> Result<String, ValidationError> {
        let value = if let Some(value) = non_empty(given) {
            value
        } else {
            let stored = non_empty(self.prefs.get(key).as_deref()).ok_or(missing)?;
            reporter.warning(&format!("No {what} specified, defaulting to {stored}"));
            stored
        };
        debug!(key, value = %value, "resolved preference");
        self.prefs.set(key, &value);
        Ok(value)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(ToString::to_string)
}

fn non_empty_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

fn ensure_output_dir(output: &Path) -> Result<(), ValidationError> {
    if output.as_os_str().is_empty() {
        return Err(ValidationError::CreateOutput {
            path: output.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "empty output path"),
        });
    }
    if output.exists() {
        return Ok(());
    }
    debug!(path = %output.display(), "creating output folder");
    std::fs::create_dir_all(output).map_err(|source| ValidationError::CreateOutput {
        path: output.to_path_buf(),
        source,
    })
}

fn absolute(path: &Path) -> Result<PathBuf, ValidationError> {
    std::path::absolute(path).map_err(|source| ValidationError::ResolvePath {
        path: path.to_path_buf(),
        source,
    })
}
