// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!           cli (clap)         cmd (sketch command)
//!                |                     |
//!                |          +----------+-----------+
//!                |          v          v           v
//!                |      validate    pipeline     report
//!                |      (rules)     (stages)   (stdout/stderr)
//!                |          |          |
//!                |        prefs    toolchain
//!                |     key=value   argv templates,
//!                |       store     gcc diagnostics
//!                v                     |
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '---------------------------'
//!
//!   +-----------------------------------------+
//!   |  core        async process spawning     |
//!   +-----------------------------------------+
//!   |  foundation  error, logging             |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod prefs;
pub mod report;
pub mod toolchain;
pub mod validate;
