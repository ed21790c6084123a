// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sketch selection arguments.
//!
//! All optional at parse time; which ones a mode requires is decided by
//! [`crate::validate`]. Values are only taken in `--flag=value` form, and an
//! empty value is still a value: `--output=` reaches validation as `""`.

use clap::Args;
use std::path::PathBuf;

use crate::cli::path_value;

/// Sketch, output and board arguments.
#[derive(Debug, Clone, Default, Args)]
pub struct SketchArgs {
    /// Specify the sketch folder (required).
    #[arg(long, value_name = "NAME", require_equals = true, value_parser = path_value)]
    pub sketch: Option<PathBuf>,

    /// Specify the output folder (required and cannot be the same as the
    /// sketch folder).
    #[arg(long, value_name = "NAME", require_equals = true, value_parser = path_value)]
    pub output: Option<PathBuf>,

    /// Specify the serial port to use for programming (required for
    /// uploading, defaults to the `serial.port` preference).
    #[arg(long, value_name = "NAME", require_equals = true)]
    pub port: Option<String>,

    /// Specify the target board to use for programming (required for
    /// uploading, defaults to the `target` preference).
    #[arg(long, value_name = "NAME", require_equals = true)]
    pub target: Option<String>,

    /// Specify a preferences file to use (optional).
    #[arg(long, value_name = "FILE", require_equals = true, value_parser = path_value)]
    pub preferences: Option<PathBuf>,
}
