// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use futures_util::future::BoxFuture;
use tempfile::TempDir;

use super::run_sketch_command;
use crate::cli::PipelineMode;
use crate::cli::sketch::SketchArgs;
use crate::cmd::report_outcome;
use crate::config::Config;
use crate::error::BuildError;
use crate::pipeline::{SketchBuilder, StageResult};
use crate::prefs::{FilePreferences, PreferenceStore, SERIAL_PORT_KEY};
use crate::report::DiagnosticReporter;

/// Builder whose stages all follow one script.
#[derive(Clone, Copy)]
enum Script {
    Succeed,
    NoArtifact,
    CompileError,
}

impl Script {
    fn outcome(self, artifact: &str) -> StageResult {
        match self {
            Self::Succeed => Ok(Some(artifact.to_string())),
            Self::NoArtifact => Ok(None),
            Self::CompileError => {
                Err(BuildError::new("Blink.pde", 4, None, "missing semicolon").into())
            }
        }
    }
}

impl SketchBuilder for Script {
    fn preprocess<'a>(&'a self, _output: &'a Path) -> BoxFuture<'a, StageResult> {
        Box::pin(async move { self.outcome("Blink.cpp") })
    }

    fn build<'a>(&'a self, _output: &'a Path, _verbose: bool) -> BoxFuture<'a, StageResult> {
        Box::pin(async move { self.outcome("Blink") })
    }

    fn upload<'a>(
        &'a self,
        _output: &'a Path,
        artifact: &'a str,
        _verbose: bool,
    ) -> BoxFuture<'a, StageResult> {
        Box::pin(async move { self.outcome(artifact) })
    }
}

struct Run {
    ok: bool,
    stdout: String,
    stderr: String,
}

async fn run(
    mode: PipelineMode,
    args: &SketchArgs,
    prefs: &mut FilePreferences,
    script: Script,
) -> Run {
    let config = Config::default();
    let mut reporter = DiagnosticReporter::new(Vec::new(), Vec::new());
    let result = run_sketch_command(mode, args, &config, prefs, &mut reporter, |_| {
        Box::new(script)
    })
    .await;
    let ok = report_outcome(result, &mut reporter);
    let (out, err) = reporter.into_inner();
    Run {
        ok,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

fn args(dir: &TempDir) -> SketchArgs {
    SketchArgs {
        sketch: Some(dir.path().join("Blink")),
        output: Some(dir.path().join("out")),
        preferences: Some(dir.path().join("preferences.txt")),
        ..SketchArgs::default()
    }
}

#[tokio::test]
async fn test_upload_with_stored_port_warns_and_persists() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("preferences.txt"),
        "serial.port=COM3\ntarget=arduino:avr:uno\n",
    )
    .unwrap();
    let mut prefs = FilePreferences::new();

    let run = run(PipelineMode::Upload, &args(&dir), &mut prefs, Script::Succeed).await;

    assert!(run.ok);
    insta::assert_snapshot!(run.stdout, @r"
    WARNING: No serial port specified, defaulting to COM3
    WARNING: No target board specified, defaulting to arduino:avr:uno
    ");
    assert!(run.stderr.is_empty());
    assert_eq!(prefs.get(SERIAL_PORT_KEY).as_deref(), Some("COM3"));
}

#[tokio::test]
async fn test_upload_without_any_port_fails() {
    let dir = TempDir::new().unwrap();
    let mut prefs = FilePreferences::new();

    let run = run(PipelineMode::Upload, &args(&dir), &mut prefs, Script::Succeed).await;

    assert!(!run.ok);
    assert!(run.stdout.is_empty());
    assert_eq!(
        run.stderr,
        "No serial port specified and no defaults to fall back on. Aborting.\n"
    );
}

#[tokio::test]
async fn test_build_with_artifact_succeeds() {
    let dir = TempDir::new().unwrap();
    let mut prefs = FilePreferences::new();

    let run = run(PipelineMode::Build, &args(&dir), &mut prefs, Script::Succeed).await;

    assert!(run.ok);
    assert!(run.stdout.is_empty() && run.stderr.is_empty());
}

#[tokio::test]
async fn test_build_without_artifact_fails_silently() {
    let dir = TempDir::new().unwrap();
    let mut prefs = FilePreferences::new();

    let run = run(PipelineMode::Build, &args(&dir), &mut prefs, Script::NoArtifact).await;

    assert!(!run.ok);
    assert!(run.stdout.is_empty() && run.stderr.is_empty());
}

#[tokio::test]
async fn test_compile_error_is_one_editor_line() {
    let dir = TempDir::new().unwrap();
    let mut prefs = FilePreferences::new();

    let run = run(PipelineMode::Build, &args(&dir), &mut prefs, Script::CompileError).await;

    assert!(!run.ok);
    assert_eq!(run.stderr, "Blink.pde:4:0:4:0: missing semicolon\n");
}

#[tokio::test]
async fn test_preprocess_reports_both_outcomes() {
    let dir = TempDir::new().unwrap();
    let mut prefs = FilePreferences::new();

    let ok = run(PipelineMode::Preprocess, &args(&dir), &mut prefs, Script::Succeed).await;
    assert!(ok.ok);
    assert_eq!(ok.stdout, "Preprocessing complete.\n");

    let failed = run(PipelineMode::Preprocess, &args(&dir), &mut prefs, Script::NoArtifact).await;
    assert!(!failed.ok);
    assert_eq!(failed.stderr, "Preprocessing failed.\n");
}

#[tokio::test]
async fn test_builder_not_created_when_validation_fails() {
    let dir = TempDir::new().unwrap();
    let mut prefs = FilePreferences::new();
    let mut args = args(&dir);
    args.output = Some(dir.path().join("Blink").join("Blink.pde"));

    let config = Config::default();
    let mut reporter = DiagnosticReporter::new(Vec::new(), Vec::new());
    let result = run_sketch_command(
        PipelineMode::Build,
        &args,
        &config,
        &mut prefs,
        &mut reporter,
        |_| panic!("builder must not be created"),
    )
    .await;

    insta::assert_snapshot!(
        result.unwrap_err().to_string(),
        @"The sketch path and output path cannot be identical."
    );
}
