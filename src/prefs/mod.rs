// sketchbuild: Sketch Build Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Preference store.
//!
//! ```text
//! PreferenceStore (trait)          FilePreferences
//!   init(Option<&Path>)   ---->    --preferences=FILE  or
//!   get(key)                       <config dir>/sketchbuild/preferences.txt
//!   set(key, value)                key=value lines, # comments
//! ```
//!
//! `init` must run before the first `get`/`set`. Values written with `set`
//! live for the rest of the process only; nothing is written back to disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::PreferencesError;

/// Key holding the default serial port.
pub const SERIAL_PORT_KEY: &str = "serial.port";

/// Key holding the default target board.
pub const TARGET_KEY: &str = "target";

/// Key-value store of named string preferences.
pub trait PreferenceStore {
    /// Loads the store from `path`, or from the default location when `None`.
    ///
    /// Calling it again with the same source keeps the current values.
    ///
    /// # Errors
    ///
    /// Returns an error if the preferences file exists but cannot be read.
    fn init(&mut self, path: Option<&Path>) -> Result<(), PreferencesError>;

    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key` for the rest of the process.
    fn set(&mut self, key: &str, value: &str);
}

/// Where the store was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    Explicit(PathBuf),
    Default,
}

/// Preferences backed by a `key=value` text file.
#[derive(Debug, Default)]
pub struct FilePreferences {
    loaded: Option<Source>,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Creates an uninitialized store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default preferences file location.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sketchbuild").join("preferences.txt"))
    }

    /// Returns whether `init` has run.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.loaded.is_some()
    }

    fn load(path: &Path) -> Result<BTreeMap<String, String>, PreferencesError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(parse_preferences(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no preferences file, starting empty");
                Ok(BTreeMap::new())
            }
            Err(source) => Err(PreferencesError::ReadError {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

impl PreferenceStore for FilePreferences {
    fn init(&mut self, path: Option<&Path>) -> Result<(), PreferencesError> {
        let source = path.map_or(Source::Default, |p| Source::Explicit(p.to_path_buf()));
        if self.loaded.as_ref() == Some(&source) {
            trace!("preferences already initialized");
            return Ok(());
        }

        let values = match &source {
            Source::Explicit(path) => Self::load(path)?,
            Source::Default => match Self::default_path() {
                Some(path) => Self::load(&path)?,
                None => BTreeMap::new(),
            },
        };

        debug!(count = values.len(), "loaded preferences");
        self.values = values;
        self.loaded = Some(source);
        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        if self.loaded.is_none() {
            debug!(key, "preference read before init");
            return None;
        }
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        debug!(key, value, "set preference");
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Parses `key=value` lines. Blank lines, `#` comments and lines without
/// `=` are skipped. The first `=` splits; later ones belong to the value.
#[must_use]
pub fn parse_preferences(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}
