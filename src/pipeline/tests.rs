// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::sync::Mutex;

use futures_util::future::BoxFuture;
use tempfile::TempDir;

use super::{PipelineDriver, SketchBuilder, StageResult};
use crate::cli::PipelineMode;
use crate::cli::sketch::SketchArgs;
use crate::config::types::SketchConfig;
use crate::error::{BuildError, StageError, TransportError};
use crate::prefs::FilePreferences;
use crate::report::DiagnosticReporter;
use crate::validate::{BuildRequest, ModeValidator};

/// Scripted stage outcomes, consumed once each.
struct FakeBuilder {
    preprocess: Mutex<Option<StageResult>>,
    build: Mutex<Option<StageResult>>,
    upload: Mutex<Option<StageResult>>,
    calls: Mutex<Vec<String>>,
}

impl FakeBuilder {
    fn new() -> Self {
        Self {
            preprocess: Mutex::new(Some(Ok(Some("Blink.cpp".to_string())))),
            build: Mutex::new(Some(Ok(Some("Blink".to_string())))),
            upload: Mutex::new(Some(Ok(Some("COM3".to_string())))),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_preprocess(self, result: StageResult) -> Self {
        *self.preprocess.lock().unwrap() = Some(result);
        self
    }

    fn with_build(self, result: StageResult) -> Self {
        *self.build.lock().unwrap() = Some(result);
        self
    }

    fn with_upload(self, result: StageResult) -> Self {
        *self.upload.lock().unwrap() = Some(result);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn take(slot: &Mutex<Option<StageResult>>) -> StageResult {
        slot.lock().unwrap().take().unwrap_or(Ok(None))
    }
}

impl SketchBuilder for FakeBuilder {
    fn preprocess<'a>(&'a self, _output: &'a Path) -> BoxFuture<'a, StageResult> {
        self.calls.lock().unwrap().push("preprocess".to_string());
        Box::pin(async move { Self::take(&self.preprocess) })
    }

    fn build<'a>(&'a self, _output: &'a Path, verbose: bool) -> BoxFuture<'a, StageResult> {
        self.calls.lock().unwrap().push(format!("build verbose={verbose}"));
        Box::pin(async move { Self::take(&self.build) })
    }

    fn upload<'a>(
        &'a self,
        _output: &'a Path,
        artifact: &'a str,
        verbose: bool,
    ) -> BoxFuture<'a, StageResult> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("upload {artifact} verbose={verbose}"));
        Box::pin(async move { Self::take(&self.upload) })
    }
}

fn request(dir: &TempDir) -> BuildRequest {
    let args = SketchArgs {
        sketch: Some(dir.path().join("Blink")),
        output: Some(dir.path().join("out")),
        port: Some("COM3".to_string()),
        target: Some("uno".to_string()),
        preferences: Some(dir.path().join("prefs.txt")),
    };
    let config = SketchConfig::default();
    let mut prefs = FilePreferences::new();
    let mut reporter = DiagnosticReporter::new(Vec::new(), Vec::new());
    ModeValidator::new(&config, &mut prefs)
        .validate(PipelineMode::Upload, &args, &mut reporter)
        .unwrap()
}

async fn drive(
    builder: &FakeBuilder,
    mode: PipelineMode,
) -> (Result<bool, StageError>, String, String) {
    let dir = TempDir::new().unwrap();
    let request = request(&dir);
    let mut reporter = DiagnosticReporter::new(Vec::new(), Vec::new());
    let result = PipelineDriver::new(builder, &request)
        .run(mode, &mut reporter)
        .await;
    let (out, err) = reporter.into_inner();
    (
        result,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[tokio::test]
async fn test_preprocess_success_notice() {
    let builder = FakeBuilder::new();
    let (result, out, err) = drive(&builder, PipelineMode::Preprocess).await;

    assert!(result.unwrap());
    assert_eq!(out, "Preprocessing complete.\n");
    assert!(err.is_empty());
    assert_eq!(builder.calls(), ["preprocess"]);
}

#[tokio::test]
async fn test_preprocess_failure_notice() {
    let builder = FakeBuilder::new().with_preprocess(Ok(None));
    let (result, out, err) = drive(&builder, PipelineMode::Preprocess).await;

    assert!(!result.unwrap());
    assert!(out.is_empty());
    assert_eq!(err, "Preprocessing failed.\n");
}

#[tokio::test]
async fn test_preprocess_build_error_propagates_without_notice() {
    let builder = FakeBuilder::new().with_preprocess(Err(BuildError::new(
        "Blink.pde",
        2,
        None,
        "unterminated comment",
    )
    .into()));
    let (result, out, err) = drive(&builder, PipelineMode::Preprocess).await;

    let failure = result.unwrap_err();
    assert_eq!(failure.as_build_error().unwrap().line, 2);
    assert!(out.is_empty() && err.is_empty());
}

#[tokio::test]
async fn test_build_is_silent() {
    let builder = FakeBuilder::new();
    let (result, out, err) = drive(&builder, PipelineMode::Build).await;

    assert!(result.unwrap());
    assert!(out.is_empty() && err.is_empty());
    assert_eq!(builder.calls(), ["build verbose=true"]);
}

#[tokio::test]
async fn test_build_without_artifact_fails_silently() {
    let builder = FakeBuilder::new().with_build(Ok(None));
    let (result, out, err) = drive(&builder, PipelineMode::Build).await;

    assert!(!result.unwrap());
    assert!(out.is_empty() && err.is_empty());
}

#[tokio::test]
async fn test_upload_passes_build_artifact() {
    let builder = FakeBuilder::new();
    let (result, _, _) = drive(&builder, PipelineMode::Upload).await;

    assert!(result.unwrap());
    assert_eq!(
        builder.calls(),
        ["build verbose=true", "upload Blink verbose=true"]
    );
}

#[tokio::test]
async fn test_upload_skipped_when_build_fails() {
    let builder = FakeBuilder::new().with_build(Ok(None));
    let (result, _, _) = drive(&builder, PipelineMode::Upload).await;

    assert!(!result.unwrap());
    assert_eq!(builder.calls(), ["build verbose=true"]);
}

#[tokio::test]
async fn test_upload_skipped_on_build_error() {
    let builder = FakeBuilder::new()
        .with_build(Err(BuildError::new("Blink.pde", 9, Some(1), "boom").into()));
    let (result, _, _) = drive(&builder, PipelineMode::Upload).await;

    assert!(result.unwrap_err().as_build_error().is_some());
    assert_eq!(builder.calls(), ["build verbose=true"]);
}

#[tokio::test]
async fn test_upload_transport_error() {
    let builder = FakeBuilder::new().with_upload(Err(TransportError {
        port: Some("COM3".to_string()),
        message: "port busy".to_string(),
    }
    .into()));
    let (result, _, _) = drive(&builder, PipelineMode::Upload).await;

    assert!(matches!(result.unwrap_err(), StageError::Transport(_)));
}

#[tokio::test]
async fn test_upload_failure_without_diagnostic() {
    let builder = FakeBuilder::new().with_upload(Ok(None));
    let (result, _, _) = drive(&builder, PipelineMode::Upload).await;

    assert!(!result.unwrap());
}
