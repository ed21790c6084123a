// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::{ProcessBuilder, ProcessFlags, StreamFlags};
use crate::error::ProcessError;

#[cfg(unix)]
fn sh(script: &str) -> ProcessBuilder {
    ProcessBuilder::new("/bin/sh").arg("-c").arg(script)
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_echo() {
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .capture_output()
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout().trim(), @"hello");
}

#[cfg(unix)]
#[tokio::test]
async fn test_allowed_failure_returns_output() {
    let output = sh("echo oops >&2; exit 42")
        .capture_output()
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.exit_code(), 42);
    assert_eq!(output.stderr(), "oops\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_failure_without_flag_is_an_error() {
    let err = sh("exit 3").name("preprocess").run().await.unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"preprocess exited with code 3");
}

#[cfg(unix)]
#[tokio::test]
async fn test_discarded_stream_is_not_kept() {
    let output = sh("echo out; echo err >&2")
        .stdout_flags(StreamFlags::BIT_BUCKET)
        .stderr_flags(StreamFlags::KEEP_IN_STRING | StreamFlags::FORWARD_TO_LOG)
        .run()
        .await
        .unwrap();

    assert!(output.stdout().is_empty());
    assert_eq!(output.stderr(), "err\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_large_output_does_not_stall() {
    let output = sh("i=0; while [ $i -lt 5000 ]; do echo line$i; i=$((i+1)); done")
        .capture_output()
        .run()
        .await
        .unwrap();

    assert_eq!(output.stdout().lines().count(), 5000);
}

#[cfg(unix)]
#[tokio::test]
async fn test_cwd_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let output = ProcessBuilder::new("pwd")
        .cwd(dir.path())
        .capture_output()
        .run()
        .await
        .unwrap();

    let expected = dir.path().canonicalize().unwrap();
    let actual = std::path::Path::new(output.stdout().trim())
        .canonicalize()
        .unwrap();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_spawn_failure() {
    let err = ProcessBuilder::new("/nonexistent/dir/tool")
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, ProcessError::SpawnFailed { .. }), "{err}");
}

#[test]
fn test_executable_lookup_not_found() {
    let err = ProcessBuilder::which("nonexistent_program_12345").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"executable not found: 'nonexistent_program_12345' (not in PATH)"
    );
}

#[cfg(unix)]
#[test]
fn test_executable_lookup_found() {
    let builder = ProcessBuilder::which("sh").expect("sh should be in PATH");
    assert!(builder.program().is_absolute());
    assert!(builder.program().exists());
}
