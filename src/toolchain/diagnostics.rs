// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Compiler output scanning.
//!
//! Recognizes gcc/clang style error lines:
//!
//! ```text
//! /work/Blink/Blink.ino:12:5: error: 'ledPin' was not declared in this scope
//! Blink.pde:4: error: expected ';' before '}' token
//! C:\sketches\Blink\Blink.ino:7:1: fatal error: Servo.h: No such file or directory
//! ```
//!
//! Warnings and notes are skipped; the first error wins.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::BuildError;

static ERROR_LINE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(?P<file>[^\r\n]+?):(?P<line>\d+):(?:(?P<column>\d+):)?\s*(?:fatal )?error:\s*(?P<message>[^\r\n]*?)\s*$",
    )
});

/// Returns the first error line in `output` as a [`BuildError`].
///
/// The file is reduced to its file name. A column of 0 counts as unknown.
#[must_use]
pub fn first_build_error(output: &str) -> Option<BuildError> {
    let regex = ERROR_LINE.as_ref().ok()?;
    let captures = regex.captures(output)?;

    let line = captures.name("line")?.as_str().parse().ok()?;
    let column = captures
        .name("column")
        .and_then(|c| c.as_str().parse::<u32>().ok())
        .filter(|&c| c > 0);

    Some(BuildError::new(
        file_name(captures.name("file")?.as_str()),
        line,
        column,
        captures.name("message")?.as_str(),
    ))
}

/// Last path component, splitting on both separator styles.
fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Last non-empty line of `output`, trimmed.
#[must_use]
pub fn last_line(output: &str) -> Option<&str> {
    output.lines().map(str::trim).rfind(|line| !line.is_empty())
}
