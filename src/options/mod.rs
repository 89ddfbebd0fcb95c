//! Camera, animation and key-binding options with TOML preset support.
//!
//! Options serialize to/from TOML so a camera setup can be stored as a
//! preset and loaded at startup.

mod animation;
mod camera;

use std::path::Path;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::input::KeyBindings;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera mode and tuning.
    pub camera: CameraOptions,
    /// Animation playback.
    pub animation: AnimationOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// JSON Schema rendered as pretty-printed JSON.
    pub fn json_schema_string() -> Result<String, RigError> {
        serde_json::to_string_pretty(&Self::json_schema())
            .map_err(|e| RigError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, RigError> {
        let content = std::fs::read_to_string(path).map_err(RigError::Io)?;
        toml::from_str(&content)
            .map_err(|e| RigError::OptionsParse(e.to_string()))
    }

    /// Load options from `path`, falling back to defaults on any failure.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(opts) => {
                log::info!("Loaded options from '{}'", path.display());
                opts
            }
            Err(e) => {
                log::error!(
                    "Failed to load options from '{}': {e}",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), RigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RigError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(RigError::Io)?;
        }
        std::fs::write(path, content).map_err(RigError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
