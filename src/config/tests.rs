// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Config, ConfigLoader};
use crate::logging::LogLevel;
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.global.output_log_level, LogLevel::WARN);
    assert_eq!(config.global.file_log_level, LogLevel::TRACE);
    assert_eq!(config.sketch.extension, "pde");
    assert_eq!(config.toolchain.preprocessed_extension, "cpp");
    assert_eq!(config.toolchain.build[0], "arduino-cli");
    assert!(config.toolchain.upload.iter().any(|arg| arg == "{port}"));
}

#[test]
fn test_config_parse() {
    let toml = r#"
[global]
output_log_level = 4
log_file = "logs/build.log"

[sketch]
extension = "ino"

[toolchain]
build = ["make", "-C", "{output}", "SKETCH={main}"]
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(
        config.global.log_file,
        Some(PathBuf::from("logs/build.log"))
    );
    assert_eq!(config.sketch.extension, "ino");
    assert_eq!(
        config.toolchain.build,
        ["make", "-C", "{output}", "SKETCH={main}"]
    );
    // Untouched sections keep their defaults.
    assert_eq!(config.toolchain.upload[0], "arduino-cli");
}

#[test]
fn test_config_rejects_unknown_keys() {
    let toml = r"
[sketch]
extention = 'pde'
";
    assert!(Config::parse(toml).is_err());
}

#[test]
fn test_config_rejects_bad_extension() {
    for ext in ["", ".pde", "a/b"] {
        let toml = format!("[sketch]\nextension = '{ext}'\n");
        assert!(Config::parse(&toml).is_err(), "extension '{ext}' accepted");
    }
}

#[test]
fn test_config_rejects_log_level_out_of_range() {
    let toml = "[global]\noutput_log_level = 9\n";
    assert!(Config::parse(toml).is_err());
}

#[test]
fn test_loader_override_wins_over_file() {
    let config = ConfigLoader::new()
        .add_toml_str("[global]\noutput_log_level = 1\n")
        .set("global.output_log_level", 5_i64)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.global.output_log_level, LogLevel::TRACE);
}

#[test]
fn test_loader_lists_sources() {
    let loader = ConfigLoader::new()
        .add_toml_str("")
        .add_toml_file_optional("definitely-missing-sketchbuild.toml");
    insta::assert_snapshot!(loader.format_loaded_files().join("\n"), @"1. [string] <string>");
}

#[test]
fn test_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sketchbuild.toml");
    std::fs::write(&path, "[toolchain]\npreprocessed_extension = 'c'\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.toolchain.preprocessed_extension, "c");
}

#[test]
fn test_missing_required_file_is_an_error() {
    assert!(Config::from_file("does/not/exist/sketchbuild.toml").is_err());
}
