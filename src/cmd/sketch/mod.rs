// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Preprocess / build / upload command.

use std::io::Write;

use tracing::{debug, info};

use crate::cli::PipelineMode;
use crate::cli::sketch::SketchArgs;
use crate::config::Config;
use crate::error::SketchResult;
use crate::pipeline::{PipelineDriver, SketchBuilder};
use crate::prefs::PreferenceStore;
use crate::report::DiagnosticReporter;
use crate::validate::{BuildRequest, ModeValidator};

/// Validates the options for `mode` and runs the pipeline.
///
/// `make_builder` binds the build collaborator to the validated request.
///
/// # Errors
///
/// Returns the validation failure, or the stage failure the pipeline hit.
pub async fn run_sketch_command<P, O, E, F>(
    mode: PipelineMode,
    args: &SketchArgs,
    config: &Config,
    prefs: &mut P,
    reporter: &mut DiagnosticReporter<O, E>,
    make_builder: F,
) -> SketchResult<bool>
where
    P: PreferenceStore + ?Sized,
    O: Write,
    E: Write,
    F: for<'r> FnOnce(&'r BuildRequest) -> Box<dyn SketchBuilder + 'r>,
{
    let request = ModeValidator::new(&config.sketch, prefs).validate(mode, args, reporter)?;
    info!(
        ?mode,
        sketch = %request.main_file().display(),
        output = %request.output().display(),
        "validated"
    );

    let builder = make_builder(&request);
    let ok = PipelineDriver::new(builder.as_ref(), &request)
        .run(mode, reporter)
        .await?;
    debug!(ok, "pipeline finished");
    Ok(ok)
}

#[cfg(test)]
mod tests;
