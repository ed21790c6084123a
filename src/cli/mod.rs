// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for sketchbuild using clap derive.
//!
//! # Invocation
//!
//! ```text
//! sketchbuild [--help|--preprocess|--build|--upload]
//!             --sketch=<folder> --output=<dir>
//!             [--port=<name>] [--target=<board>] [--preferences=<file>]
//!             [--config=<file>] [--log-level=<0-6>] [--log-file=<file>]
//! ```
//!
//! Mode flags override each other: the last one wins, repeating one is not an
//! error, and no mode flag at all means `--help`. Empty tokens are dropped
//! before parsing.
//!
//! Every other token must be a mode flag or `--<key>=<value>` for a known
//! key. Anything else, including `--`, `--sketch` without `=`, and stray
//! positionals, is a [`UsageError`] naming the first such token verbatim.

pub mod global;
pub mod sketch;


use std::convert::Infallible;
use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, Args, Command, CommandFactory, Parser};

use crate::cli::global::GlobalOptions;
use crate::cli::sketch::SketchArgs;
use crate::error::UsageError;

/// Sketch Build Tool
///
/// Preprocesses, compiles and uploads sketches from scripts.
#[derive(Debug, Parser)]
#[command(
    name = "sketchbuild",
    about = "Sketch Build Tool",
    long_about = "sketchbuild Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Preprocesses, compiles and uploads a sketch. A sketch is a\n\
                  folder whose main source file shares the folder's name, e.g.\n\
                  Blink/Blink.pde.",
    after_help = "MODES:\n\n\
                  Exactly one mode runs. When several mode flags are given the\n\
                  last one wins; without any, this help is shown.\n\n\
                  ERRORS:\n\n\
                  Compiler errors are printed as\n\
                  <file>:<line>:<column>:<line>:<column>: <message>\n\
                  on stderr. The exit status is 0 on success and 1 otherwise.",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Cli {
    /// Mode selection
    #[command(flatten)]
    pub mode: ModeArgs,

    /// Sketch and target selection
    #[command(flatten)]
    pub sketch: SketchArgs,

    /// Logging and configuration
    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Mode-selecting flags. Each one overrides the others.
#[derive(Debug, Clone, Default, Args)]
pub struct ModeArgs {
    /// Show this help text.
    #[arg(long, action = ArgAction::SetTrue, overrides_with_all = ["preprocess", "build", "upload"])]
    pub help: bool,

    /// Preprocess a sketch into .cpp files.
    #[arg(long, action = ArgAction::SetTrue, overrides_with_all = ["help", "build", "upload"])]
    pub preprocess: bool,

    /// Preprocess and compile a sketch into a binary.
    #[arg(long, action = ArgAction::SetTrue, overrides_with_all = ["help", "preprocess", "upload"])]
    pub build: bool,

    /// Preprocess, compile, and upload a sketch.
    #[arg(long, action = ArgAction::SetTrue, overrides_with_all = ["help", "preprocess", "build"])]
    pub upload: bool,
}

/// The selected pipeline depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Help,
    Preprocess,
    Build,
    Upload,
}

/// The modes that run the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineMode {
    Preprocess,
    Build,
    Upload,
}

impl Mode {
    /// Returns the pipeline to run, or `None` for help.
    #[must_use]
    pub const fn pipeline(self) -> Option<PipelineMode> {
        match self {
            Self::Help => None,
            Self::Preprocess => Some(PipelineMode::Preprocess),
            Self::Build => Some(PipelineMode::Build),
            Self::Upload => Some(PipelineMode::Upload),
        }
    }
}

impl ModeArgs {
    /// Returns the mode left standing after overrides.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        if self.upload {
            Mode::Upload
        } else if self.build {
            Mode::Build
        } else if self.preprocess {
            Mode::Preprocess
        } else {
            Mode::Help
        }
    }
}

impl Cli {
    /// Returns the selected mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode.mode()
    }
}

/// Parses the argument vector (without the program name).
///
/// # Errors
///
/// Returns a [`UsageError`] naming the first token that is not a mode flag or
/// a known `--key=value` flag, or describing a value clap rejected.
pub fn parse_args<I, T>(args: I) -> Result<Cli, UsageError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let tokens: Vec<String> = args
        .into_iter()
        .map(|arg| arg.as_ref().to_string())
        .filter(|arg| !arg.is_empty())
        .collect();

    let mut command = Cli::command();
    command.build();
    if let Some(token) = tokens.iter().find(|token| !is_recognized(&command, token)) {
        return Err(UsageError::UnknownToken(token.clone()));
    }

    Cli::try_parse_from(std::iter::once("sketchbuild").chain(tokens.iter().map(String::as_str)))
        .map_err(|e| usage_error(&e, &tokens))
}

/// Whether `token` is a switch (`--build`) or a `--key=value` flag of
/// `command`. Value flags without `=` and the `--` marker are not.
fn is_recognized(command: &Command, token: &str) -> bool {
    let Some(name) = token.strip_prefix("--") else {
        return false;
    };
    command.get_arguments().any(|arg| {
        let Some(rest) = arg.get_long().and_then(|long| name.strip_prefix(long)) else {
            return false;
        };
        if arg.get_action().takes_values() {
            rest.starts_with('=')
        } else {
            rest.is_empty()
        }
    })
}

fn usage_error(err: &clap::Error, tokens: &[String]) -> UsageError {
    if err.kind() == ErrorKind::UnknownArgument
        && let Some(ContextValue::String(name)) = err.get(ContextKind::InvalidArg)
    {
        let raw = tokens
            .iter()
            .find(|token| token.split('=').next() == Some(name.as_str()))
            .unwrap_or(name);
        return UsageError::UnknownToken(raw.clone());
    }

    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or_default();
    UsageError::Rejected(
        first_line
            .strip_prefix("error: ")
            .unwrap_or(first_line)
            .to_string(),
    )
}

/// Path value parser that keeps empty values, leaving them to validation.
pub(crate) fn path_value(value: &str) -> Result<PathBuf, Infallible> {
    Ok(PathBuf::from(value))
}

/// Full usage text, as printed for `--help` and on usage errors.
#[must_use]
pub fn usage() -> String {
    Cli::command().render_long_help().to_string()
}
