// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! Cli --> mode.pipeline() --> cmd::sketch::run_sketch_command
//!                                 validate --> pipeline
//!           SketchResult<bool> --> exit_status --> ExitCode
//! ```

pub mod sketch;

use std::io::Write;
use std::process::ExitCode;

use crate::error::SketchResult;
use crate::report::DiagnosticReporter;

/// Reports any failure in `result` and returns whether the invocation
/// succeeded.
///
/// `Ok(false)` is a failure that was already reported (or has nothing to
/// report) and stays silent.
pub fn report_outcome<O: Write, E: Write>(
    result: SketchResult<bool>,
    reporter: &mut DiagnosticReporter<O, E>,
) -> bool {
    let ok = match result {
        Ok(ok) => ok,
        Err(failure) => {
            tracing::debug!(error = ?failure, "invocation failed");
            reporter.failure(failure);
            false
        }
    };
    reporter.flush();
    ok
}

/// Exit status for [`report_outcome`]: 0 on success, 1 otherwise.
pub fn exit_status<O: Write, E: Write>(
    result: SketchResult<bool>,
    reporter: &mut DiagnosticReporter<O, E>,
) -> ExitCode {
    if report_outcome(result, reporter) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
