// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! parse_args --> Help? --> usage, exit 0
//!     |
//!     v
//! Config (layered) --> Logging --> cmd::sketch --> exit 0 / 1
//! ```

use std::process::ExitCode;

use sketchbuild::cli::global::GlobalOptions;
use sketchbuild::cli::parse_args;
use sketchbuild::cmd::exit_status;
use sketchbuild::cmd::sketch::run_sketch_command;
use sketchbuild::config::Config;
use sketchbuild::config::types::GlobalConfig;
use sketchbuild::error::{ConfigError, SketchError, SketchResult};
use sketchbuild::logging::{LogConfig, init_logging};
use sketchbuild::prefs::FilePreferences;
use sketchbuild::report::DiagnosticReporter;
use sketchbuild::toolchain::ToolchainBuilder;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let mut reporter = DiagnosticReporter::stdio();

    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());
    let cli = match parse_args(args) {
        Ok(cli) => cli,
        Err(usage) => return exit_status(Err(usage.into()), &mut reporter),
    };

    let Some(mode) = cli.mode().pipeline() else {
        reporter.usage();
        reporter.flush();
        return ExitCode::SUCCESS;
    };

    let (config, sources) = match load_config(&cli.global) {
        Ok(loaded) => loaded,
        Err(e) => return exit_status(Err(e), &mut reporter),
    };
    // The builder factory must hand out borrows valid for any request
    // lifetime; the config lives for the whole process anyway.
    let config: &'static Config = Box::leak(Box::new(config));

    let _log_guard = match init_logging(&build_log_config(&config.global)) {
        Ok(guard) => guard,
        Err(e) => {
            reporter.error(&format!("Failed to initialize logging: {e:#}"));
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!(?sources, "configuration loaded");

    let mut prefs = FilePreferences::new();
    let result = run_sketch_command(
        mode,
        &cli.sketch,
        &config,
        &mut prefs,
        &mut reporter,
        |request| Box::new(ToolchainBuilder::new(&config.toolchain, request)),
    )
    .await;

    exit_status(result, &mut reporter)
}

fn build_log_config(global: &GlobalConfig) -> LogConfig {
    LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

/// Loads the layered configuration and lists its sources.
fn load_config(global: &GlobalOptions) -> SketchResult<(Config, Vec<String>)> {
    let loader = global.config_loader().map_err(config_error)?;
    let sources = loader.format_loaded_files();
    let config = loader.build().map_err(config_error)?;
    Ok((config, sources))
}

fn config_error(e: anyhow::Error) -> SketchError {
    ConfigError::LoadError {
        message: format!("{e:#}"),
    }
    .into()
}
