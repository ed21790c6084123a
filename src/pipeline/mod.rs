// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pipeline driver.
//!
//! ```text
//! Preprocess:  preprocess(output) --> "Preprocessing complete." | "Preprocessing failed."
//! Build:       build(output, verbose)
//! Upload:      build(output, verbose) --artifact--> upload(output, artifact, verbose)
//!
//! Ok(Some(_)) = success, Ok(None) = failure without diagnostic,
//! Err(StageError) = diagnosed failure, handed back to the caller
//! ```

use std::io::Write;
use std::path::Path;

use futures_util::future::BoxFuture;
use tracing::{debug, info};

use crate::cli::PipelineMode;
use crate::error::StageError;
use crate::report::DiagnosticReporter;
use crate::validate::BuildRequest;

/// Outcome of one stage: an artifact, an undiagnosed failure, or an error.
pub type StageResult = Result<Option<String>, StageError>;

/// The build collaborator, bound to one sketch.
pub trait SketchBuilder {
    /// Converts the sketch into compilable sources under `output`.
    fn preprocess<'a>(&'a self, output: &'a Path) -> BoxFuture<'a, StageResult>;

    /// Compiles the sketch. Returns the artifact name on success.
    fn build<'a>(&'a self, output: &'a Path, verbose: bool) -> BoxFuture<'a, StageResult>;

    /// Uploads `artifact` to the board.
    fn upload<'a>(
        &'a self,
        output: &'a Path,
        artifact: &'a str,
        verbose: bool,
    ) -> BoxFuture<'a, StageResult>;
}

/// Runs the stages a mode asks for.
pub struct PipelineDriver<'a, B: SketchBuilder + ?Sized> {
    builder: &'a B,
    request: &'a BuildRequest,
}

impl<'a, B: SketchBuilder + ?Sized> PipelineDriver<'a, B> {
    pub const fn new(builder: &'a B, request: &'a BuildRequest) -> Self {
        Self { builder, request }
    }

    /// Runs `mode` and returns whether it succeeded.
    ///
    /// # Errors
    ///
    /// Returns the first [`StageError`] a stage reports. Later stages do not
    /// run.
    pub async fn run<O: Write, E: Write>(
        &self,
        mode: PipelineMode,
        reporter: &mut DiagnosticReporter<O, E>,
    ) -> Result<bool, StageError> {
        let output = self.request.output();
        debug!(?mode, output = %output.display(), "running pipeline");

        match mode {
            PipelineMode::Preprocess => {
                let ok = self.builder.preprocess(output).await?.is_some();
                if ok {
                    reporter.notice("Preprocessing complete.");
                } else {
                    reporter.error("Preprocessing failed.");
                }
                Ok(ok)
            }
            PipelineMode::Build => Ok(self.builder.build(output, true).await?.is_some()),
            PipelineMode::Upload => {
                let Some(artifact) = self.builder.build(output, true).await? else {
                    return Ok(false);
                };
                info!(%artifact, "built, uploading");
                Ok(self
                    .builder
                    .upload(output, &artifact, true)
                    .await?
                    .is_some())
            }
        }
    }
}

#[cfg(test)]
mod tests;
