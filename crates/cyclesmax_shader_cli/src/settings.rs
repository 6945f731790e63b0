// SPDX-License-Identifier: MIT OR Apache-2.0
//! Exporter settings.
//!
//! Settings live in a RON file and cover:
//! - Which scene render engines may be exported from
//! - The extension given to output files
//! - The default log filter

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Settings file name looked up next to the working directory
pub const SETTINGS_FILE_NAME: &str = "cyclesmax_export.ron";

/// Errors from reading or writing settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// File could not be read or written
    #[error("Settings file {}: {source}", path.display())]
    Io {
        /// Settings path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// File is not valid settings RON
    #[error("Invalid settings file {}: {source}", path.display())]
    Parse {
        /// Settings path
        path: PathBuf,
        /// Parser error with position
        source: ron::error::SpannedError,
    },

    /// Settings could not be encoded
    #[error("Failed to encode settings: {0}")]
    Encode(#[from] ron::Error),

    /// Written by a newer exporter
    #[error("Settings version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Highest version this build reads
        supported: u32,
    },
}

/// Exporter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Settings format version
    pub version: u32,
    /// Render engines whose scenes may be exported
    pub allowed_render_engines: Vec<String>,
    /// Extension given to output files that lack it, without the dot
    pub file_extension: String,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            allowed_render_engines: vec!["CYCLES".to_string(), "BLENDER_EEVEE".to_string()],
            file_extension: "shader".to_string(),
            log_filter: "cyclesmax_shader_cli=info".to_string(),
        }
    }
}

impl ExportSettings {
    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: ExportSettings =
            ron::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(SettingsError::UnsupportedVersion {
                found: settings.version,
                supported: SETTINGS_FORMAT_VERSION,
            });
        }

        Ok(settings)
    }

    /// Load settings from a file if given, else the settings file in the
    /// working directory if present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let local = Path::new(SETTINGS_FILE_NAME);
                if local.is_file() {
                    Self::load(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let config = ron::ser::PrettyConfig::default().struct_names(true);
        let content = ron::ser::to_string_pretty(self, config)?;
        std::fs::write(path, content).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether scenes rendered with `engine` may be exported
    pub fn allows_render_engine(&self, engine: &str) -> bool {
        self.allowed_render_engines.iter().any(|e| e == engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ExportSettings::default();
        assert_eq!(settings.version, SETTINGS_FORMAT_VERSION);
        assert!(settings.allows_render_engine("CYCLES"));
        assert!(settings.allows_render_engine("BLENDER_EEVEE"));
        assert!(!settings.allows_render_engine("BLENDER_WORKBENCH"));
        assert_eq!(settings.file_extension, "shader");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);

        let settings = ExportSettings {
            allowed_render_engines: vec!["CYCLES".to_string()],
            ..Default::default()
        };
        settings.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("ExportSettings("));
        assert_eq!(ExportSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.ron");
        std::fs::write(&path, "(file_extension: \"cshader\")").unwrap();

        let settings = ExportSettings::load(&path).unwrap();
        assert_eq!(settings.file_extension, "cshader");
        assert_eq!(settings.allowed_render_engines.len(), 2);
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.ron");
        std::fs::write(&path, format!("(version: {})", SETTINGS_FORMAT_VERSION + 1)).unwrap();

        let err = ExportSettings::load(&path).unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedVersion { found: 2, supported: 1 }));
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        std::fs::write(&path, "(version: \"one\"").unwrap();
        assert!(matches!(ExportSettings::load(&path), Err(SettingsError::Parse { .. })));

        let missing = dir.path().join("missing.ron");
        assert!(matches!(ExportSettings::load(&missing), Err(SettingsError::Io { .. })));
    }
}
