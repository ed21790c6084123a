// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! External toolchain stages.
//!
//! ```text
//! [toolchain] argv template             expand placeholders
//!   ["arduino-cli", "compile",   --->   {sketch} {main} {name} {output}
//!    "--fqbn", "{target}", ...]         {port} {target} {artifact}
//!                                            |
//!                                            v
//!                                 ProcessBuilder::which(argv[0]).run()
//!                                            |
//!             +------------------------------+---------------------------+
//!             v                              v                           v
//!        exit 0                      exit != 0 (pre/build)        exit != 0 (upload)
//!   Ok(Some(artifact))          first gcc error -> BuildError   TransportError(last
//!                               none -> Ok(None)                stderr line)
//! ```

pub mod diagnostics;


use std::io;
use std::path::Path;

use futures_util::future::BoxFuture;
use regex::Regex;
use tracing::{debug, info};

use crate::config::types::ToolchainConfig;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};
use crate::error::{ProcessError, StageError, TransportError};
use crate::pipeline::{SketchBuilder, StageResult};
use crate::validate::BuildRequest;

/// Runs the configured toolchain commands for one sketch.
#[derive(Debug, Clone, Copy)]
pub struct ToolchainBuilder<'a> {
    config: &'a ToolchainConfig,
    request: &'a BuildRequest,
}

impl<'a> ToolchainBuilder<'a> {
    #[must_use]
    pub const fn new(config: &'a ToolchainConfig, request: &'a BuildRequest) -> Self {
        Self { config, request }
    }

    /// Expands every `{placeholder}` in `template`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error for an unknown placeholder or one whose
    /// value is not set for this invocation.
    pub fn expand(
        &self,
        stage: &str,
        template: &[String],
        artifact: Option<&str>,
    ) -> Result<Vec<String>, StageError> {
        let placeholder = Regex::new(r"\{([^{}]*)\}")
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        template
            .iter()
            .map(|arg| {
                let mut expanded = String::with_capacity(arg.len());
                let mut last = 0;
                for captures in placeholder.captures_iter(arg) {
                    let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
                        continue;
                    };
                    expanded.push_str(&arg[last..whole.start()]);
                    expanded.push_str(&self.value(stage, key.as_str(), artifact)?);
                    last = whole.end();
                }
                expanded.push_str(&arg[last..]);
                Ok(expanded)
            })
            .collect()
    }

    fn value(&self, stage: &str, key: &str, artifact: Option<&str>) -> Result<String, StageError> {
        let request = self.request;
        let value = match key {
            "sketch" => Some(request.sketch_folder().display().to_string()),
            "main" => Some(request.main_file().display().to_string()),
            "name" => Some(request.sketch_name()),
            "output" => Some(request.output().display().to_string()),
            "port" => request.port().map(ToString::to_string),
            "target" => request.target().map(ToString::to_string),
            "artifact" => artifact.map(ToString::to_string),
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("unknown placeholder {{{key}}} in the {stage} command"),
                )
                .into());
            }
        };
        value.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("the {stage} command needs {{{key}}}, which is not set"),
            )
            .into()
        })
    }

    /// Expands and runs one stage command. Non-zero exits are returned, not
    /// raised.
    async fn run_stage(
        &self,
        stage: &str,
        template: &[String],
        artifact: Option<&str>,
        stdout: StreamFlags,
    ) -> Result<ProcessOutput, StageError> {
        let argv = self.expand(stage, template, artifact)?;
        let Some((program, args)) = argv.split_first() else {
            return Err(ProcessError::EmptyCommand {
                stage: stage.to_string(),
            }
            .into());
        };

        let output = ProcessBuilder::which(program)?
            .args(args)
            .cwd(self.request.output())
            .name(stage)
            .stdout_flags(stdout)
            .stderr_flags(StreamFlags::KEEP_IN_STRING | StreamFlags::FORWARD_TO_LOG)
            .flag(ProcessFlags::ALLOW_FAILURE)
            .run()
            .await?;
        debug!(stage, exit_code = output.exit_code(), "stage finished");
        Ok(output)
    }

    /// Maps a failed compile-like stage to a build error, if one was printed.
    fn diagnose(stage: &str, output: &ProcessOutput) -> StageResult {
        let diagnostic = diagnostics::first_build_error(output.stderr())
            .or_else(|| diagnostics::first_build_error(output.stdout()));
        match diagnostic {
            Some(err) => Err(err.into()),
            None => {
                debug!(
                    stage,
                    exit_code = output.exit_code(),
                    "stage failed without a diagnostic"
                );
                Ok(None)
            }
        }
    }

    async fn run_preprocess(&self, output: &Path) -> StageResult {
        let result = self
            .run_stage(
                "preprocess",
                &self.config.preprocess,
                None,
                StreamFlags::KEEP_IN_STRING,
            )
            .await?;
        if !result.success() {
            return Self::diagnose("preprocess", &result);
        }

        let target = output.join(format!(
            "{}.{}",
            self.request.sketch_name(),
            self.config.preprocessed_extension
        ));
        tokio::fs::write(&target, result.stdout()).await?;
        info!(path = %target.display(), "wrote preprocessed source");
        Ok(Some(target.display().to_string()))
    }

    async fn run_build(&self, verbose: bool) -> StageResult {
        let stdout = if verbose {
            StreamFlags::INHERIT
        } else {
            StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING
        };
        let result = self
            .run_stage("build", &self.config.build, None, stdout)
            .await?;
        if !result.success() {
            return Self::diagnose("build", &result);
        }
        Ok(Some(self.request.sketch_name()))
    }

    async fn run_upload(&self, artifact: &str, verbose: bool) -> StageResult {
        let stdout = if verbose {
            StreamFlags::INHERIT
        } else {
            StreamFlags::FORWARD_TO_LOG
        };
        let result = self
            .run_stage("upload", &self.config.upload, Some(artifact), stdout)
            .await?;
        if !result.success() {
            let message = diagnostics::last_line(result.stderr()).map_or_else(
                || format!("upload exited with code {}", result.exit_code()),
                ToString::to_string,
            );
            return Err(TransportError {
                port: self.request.port().map(ToString::to_string),
                message,
            }
            .into());
        }
        Ok(self
            .request
            .port()
            .or_else(|| self.request.target())
            .map(ToString::to_string))
    }
}

impl SketchBuilder for ToolchainBuilder<'_> {
    fn preprocess<'a>(&'a self, output: &'a Path) -> BoxFuture<'a, StageResult> {
        Box::pin(self.run_preprocess(output))
    }

    fn build<'a>(&'a self, _output: &'a Path, verbose: bool) -> BoxFuture<'a, StageResult> {
        Box::pin(self.run_build(verbose))
    }

    fn upload<'a>(
        &'a self,
        _output: &'a Path,
        artifact: &'a str,
        verbose: bool,
    ) -> BoxFuture<'a, StageResult> {
        Box::pin(self.run_upload(artifact, verbose))
    }
}
