// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          SketchError (16 bytes)
//!                   |
//!   +-------+-------+--------+
//!   |       |       |        |
//!   v       v       v        v
//! Usage  Invalid  Stage   Config
//!  Box     Box     Box      Box
//!
//! StageError (what a pipeline stage can fail with):
//!   Build      file:line:column message   -> editor-style line
//!   Transport  upload/serial failure      -> dump
//!   Io         std::io::Error             -> dump
//!   Process    spawn / lookup failure     -> dump
//! ```
//!
//! Every failure class maps to exit status 1.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`SketchError`].
pub type SketchResult<T> = std::result::Result<T, SketchError>;

/// Top-level error of one invocation.
///
/// All sub-errors are boxed to keep this enum at 16 bytes on the stack.
#[derive(Debug, Error)]
pub enum SketchError {
    /// The argument vector could not be parsed.
    #[error(transparent)]
    Usage(Box<UsageError>),

    /// The options failed a mode rule.
    #[error(transparent)]
    Validation(Box<ValidationError>),

    /// A pipeline stage failed.
    #[error(transparent)]
    Stage(Box<StageError>),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(Box<ConfigError>),
}

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($target:ident { $($error:ty => $variant:ident),+ $(,)? }) => {
        $(
            impl From<$error> for $target {
                fn from(err: $error) -> Self {
                    $target::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    SketchError {
        UsageError => Usage,
        ValidationError => Validation,
        StageError => Stage,
        ConfigError => Config,
    }
}

impl_from_boxed! {
    StageError {
        BuildError => Build,
        TransportError => Transport,
        std::io::Error => Io,
        ProcessError => Process,
    }
}

// --- Usage Errors ---

/// Argument vector errors, raised before any validation runs.
#[derive(Debug, Error)]
pub enum UsageError {
    /// A token that is neither a mode flag nor a known `--key=value` flag.
    #[error("I don't know anything about {0}.")]
    UnknownToken(String),

    /// A known flag with an unusable value (for example `--output=`).
    #[error("{0}")]
    Rejected(String),
}

// --- Validation Errors ---

/// Mode rule violations. Each one is fatal for the invocation.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("An output path must be specified when using --preprocess, --build, or --upload.")]
    MissingOutput,

    #[error("Could not create the output folder.")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read preferences: {0}")]
    Preferences(#[source] Box<PreferencesError>),

    #[error("No serial port specified and no defaults to fall back on. Aborting.")]
    NoSerialPort,

    #[error("No target board specified and no defaults to fall back on. Aborting.")]
    NoTarget,

    #[error("No sketch path specified.")]
    MissingSketch,

    #[error("Could not resolve path '{path}': {source}")]
    ResolvePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The sketch path and output path cannot be identical.")]
    PathCollision,

    #[error("Sketch path must point to the main .{extension} file.")]
    BadExtension { extension: String },
}

impl From<PreferencesError> for ValidationError {
    fn from(err: PreferencesError) -> Self {
        Self::Preferences(Box::new(err))
    }
}

// --- Stage Errors ---

/// Failure raised by a pipeline stage of the build collaborator.
#[derive(Debug, Error)]
pub enum StageError {
    /// Compiler-style diagnostic with a source position.
    #[error("build error in {0}")]
    Build(#[source] Box<BuildError>),

    /// The upload transport failed.
    #[error("upload failed")]
    Transport(#[source] Box<TransportError>),

    /// Unexpected filesystem or stream failure.
    #[error("i/o error")]
    Io(#[source] Box<std::io::Error>),

    /// A stage tool could not be started.
    #[error("toolchain error")]
    Process(#[source] Box<ProcessError>),
}

impl StageError {
    /// Returns the structured diagnostic if this is a build error.
    #[must_use]
    pub fn as_build_error(&self) -> Option<&BuildError> {
        match self {
            Self::Build(err) => Some(err),
            _ => None,
        }
    }
}

/// A compiler diagnostic pinned to a sketch source position.
///
/// `line` is 1-based. `column` is 1-based when known.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{file}:{line}: {message}")]
pub struct BuildError {
    pub file: String,
    pub line: u32,
    pub column: Option<u32>,
    pub message: String,
}

impl BuildError {
    pub fn new(
        file: impl Into<String>,
        line: u32,
        column: Option<u32>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            message: message.into(),
        }
    }
}

/// Upload transport failure (serial port busy, programmer not responding...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub port: Option<String>,
    pub message: String,
}

// --- Process Errors ---

/// Errors starting or talking to an external tool.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed while waiting for the process or its output.
    #[error("failed to wait for process '{command}': {source}")]
    WaitFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a non-success code.
    #[error("{name} exited with code {code}")]
    Failed { name: String, code: i32 },

    /// An empty command template.
    #[error("no command configured for {stage}")]
    EmptyCommand { stage: String },
}

// --- Preferences Errors ---

/// Preference file errors.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// Failed to read the preferences file.
    #[error("failed to read preferences file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to load or merge configuration sources.
    #[error("failed to load configuration: {message}")]
    LoadError { message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}
