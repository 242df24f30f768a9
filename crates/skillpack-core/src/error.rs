use std::path::PathBuf;

use skillpack_archive::ArchiveError;
use skillpack_manifest::{SkillDirError, Violation};

#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error(transparent)]
    SkillDir(#[from] SkillDirError),

    #[error("validation failed with {} violation(s)", .0.len())]
    Invalid(Vec<Violation>),

    #[error("archiving failed: {0}")]
    Archive(#[from] ArchiveError),

    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
