// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Output streaming and capture.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks (one per piped stream)
//!   wait
//!   join readers --> ProcessOutput { stdout, stderr, exit_code }
//! ```
//!
//! Readers drain their pipe concurrently with `wait`, so a chatty child never
//! blocks on a full pipe.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};

/// Spawns a reader task for a piped stream if anything wants its lines.
fn spawn_reader<R>(
    stream: Option<R>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &'static str,
) -> Option<JoinHandle<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    if !flags.intersects(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING) {
        return None;
    }
    let name = process_name.to_string();
    stream.map(|stream| {
        tokio::spawn(async move { read_stream(stream, flags, &name, stream_name).await })
    })
}

async fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}

impl ProcessBuilder {
    /// Runs the child process, streaming its output until it exits.
    pub(super) async fn run_child(
        &self,
        name: &str,
        child: &mut Child,
    ) -> std::io::Result<ProcessOutput> {
        let stdout = spawn_reader(child.stdout.take(), self.stdout_config(), name, "stdout");
        let stderr = spawn_reader(child.stderr.take(), self.stderr_config(), name, "stderr");

        let status = child.wait().await?;

        Ok(ProcessOutput::new(
            status.code().unwrap_or(-1),
            join_reader(stdout).await,
            join_reader(stderr).await,
        ))
    }
}

/// Reads lines from a stream, logging and/or keeping them.
async fn read_stream<R>(
    reader: R,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &str,
) -> String
where
    R: AsyncRead + Unpin,
{
    let mut kept = String::new();
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                    trace!(process = %process_name, stream = %stream_name, line = %line, "output");
                }
                if flags.contains(StreamFlags::KEEP_IN_STRING) {
                    kept.push_str(&line);
                    kept.push('\n');
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(
                    process = %process_name,
                    stream = %stream_name,
                    error = %e,
                    "error reading stream"
                );
                break;
            }
        }
    }
    kept
}
