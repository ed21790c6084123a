// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! User-facing output.
//!
//! ```text
//! notice / warning / usage ------------------------> stdout
//! error / usage_error / validation ---------------> stderr
//! stage failure --+-- Build  --> file:l:c:l:c: msg -> stderr
//!                 +-- other  --> error + causes    -> stderr
//! ```
//!
//! Write failures on either stream are ignored: there is nowhere left to
//! report them.

use std::io::{Stderr, Stdout, Write};

use crate::error::{BuildError, SketchError, StageError};

/// Formats a build error as an editor-parsable line.
///
/// `Sketch.pde:4:0:4:0: missing semicolon`. The position is repeated as a
/// start/end range; an unknown column prints as 0.
#[must_use]
pub fn format_build_error(err: &BuildError) -> String {
    let line = err.line;
    let column = err.column.unwrap_or(0);
    format!(
        "{}:{line}:{column}:{line}:{column}: {}",
        err.file, err.message
    )
}

/// Routes notices and diagnostics to stdout/stderr.
pub struct DiagnosticReporter<O: Write, E: Write> {
    out: O,
    err: E,
}

impl DiagnosticReporter<Stdout, Stderr> {
    /// Reporter bound to the process streams.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdout(), std::io::stderr())
    }
}

impl<O: Write, E: Write> DiagnosticReporter<O, E> {
    pub const fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Success notice on stdout.
    pub fn notice(&mut self, message: &str) {
        let _ = writeln!(self.out, "{message}");
    }

    /// Non-fatal warning on stdout.
    pub fn warning(&mut self, message: &str) {
        let _ = writeln!(self.out, "WARNING: {message}");
    }

    /// Single-line error on stderr.
    pub fn error(&mut self, message: &str) {
        let _ = writeln!(self.err, "{message}");
    }

    /// Usage text on stdout, for `--help`.
    pub fn usage(&mut self) {
        let _ = write!(self.out, "{}", crate::cli::usage());
        let _ = writeln!(self.out);
    }

    /// Reports a stage failure: build errors as an editor line, everything
    /// else as an unstructured dump with its cause chain.
    pub fn stage_failure(&mut self, failure: StageError) {
        if let Some(build) = failure.as_build_error() {
            let line = format_build_error(build);
            self.error(&line);
            return;
        }
        let report = anyhow::Error::new(failure);
        let _ = writeln!(self.err, "{report:?}");
    }

    /// Reports any invocation failure on stderr.
    ///
    /// Usage errors get the full usage text first.
    pub fn failure(&mut self, failure: SketchError) {
        match failure {
            SketchError::Usage(usage) => {
                let _ = write!(self.err, "{}", crate::cli::usage());
                let _ = writeln!(self.err);
                self.error(&usage.to_string());
            }
            SketchError::Stage(stage) => self.stage_failure(*stage),
            other => self.error(&other.to_string()),
        }
    }

    /// Flushes both streams.
    pub fn flush(&mut self) {
        let _ = self.out.flush();
        let _ = self.err.flush();
    }

    /// Returns the underlying streams.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}
