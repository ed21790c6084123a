// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning for the toolchain commands.
//!
//! ```text
//! ProcessBuilder::which("arduino-cli")
//!   .args() .cwd() .name() .stdout_flags() .stderr_flags()
//!   .run()
//!       --> tokio::process::Command
//!           stream stdout/stderr (log / keep / inherit / discard)
//!       --> ProcessOutput { exit_code, stdout, stderr }
//! ```

pub mod builder;
mod io;
mod runner;
#[cfg(test)]
mod tests;
