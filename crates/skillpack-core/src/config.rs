use std::path::Path;

use serde::Deserialize;
use skillpack_archive::{ArchiveOptions, DEFAULT_EXTENSION};

use crate::error::ConfigError;

fn default_true() -> bool {
    true
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_owned()
}

/// Top-level packaging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackConfig {
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// How the `.skill` archive is named and written.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_true")]
    pub sort_entries: bool,
    #[serde(default = "default_true")]
    pub preserve_mtime: bool,
    #[serde(default)]
    pub compression_level: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            sort_entries: default_true(),
            preserve_mtime: default_true(),
            compression_level: None,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl PackConfig {
    /// Load configuration from a TOML file.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str::<Self>(&content)?
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error for an empty or dotted extension, or a compression level outside 1-9.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ext = &self.archive.extension;
        if ext.is_empty() || ext.contains(['.', '/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "archive.extension must be a bare extension like \"skill\", got {ext:?}"
            )));
        }
        if let Some(level) = self.archive.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(ConfigError::Invalid(format!(
                "archive.compression_level must be between 1 and 9, got {level}"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn archive_options(&self) -> ArchiveOptions {
        ArchiveOptions {
            extension: self.archive.extension.clone(),
            sort_entries: self.archive.sort_entries,
            preserve_mtime: self.archive.preserve_mtime,
            compression_level: self.archive.compression_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = PackConfig::default();
        assert_eq!(config.archive.extension, "skill");
        assert!(config.archive.sort_entries);
        assert!(config.archive.preserve_mtime);
        assert!(config.archive.compression_level.is_none());
        assert!(config.validation.enabled);
        assert_eq!(config.archive_options(), ArchiveOptions::default());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PackConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert!(config.validation.enabled);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skillpack.toml");
        std::fs::write(
            &path,
            "[archive]\nsort_entries = false\ncompression_level = 9\n\n[validation]\nenabled = false\n",
        )
        .unwrap();

        let config = PackConfig::load(&path).unwrap();
        assert!(!config.archive.sort_entries);
        assert_eq!(config.archive.compression_level, Some(9));
        assert_eq!(config.archive.extension, "skill");
        assert!(config.archive.preserve_mtime);
        assert!(!config.validation.enabled);
    }

    #[test]
    fn rejects_bad_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skillpack.toml");
        std::fs::write(&path, "[archive]\nextension = \".zip\"\n").unwrap();

        let err = PackConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_out_of_range_level() {
        let mut config = PackConfig::default();
        config.archive.compression_level = Some(12);
        assert!(config.validate().is_err());
        config.archive.compression_level = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(msg)) if msg.contains("between 1 and 9")
        ));
        config.archive.compression_level = Some(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skillpack.toml");
        std::fs::write(&path, "[archive\n").unwrap();

        let err = PackConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
