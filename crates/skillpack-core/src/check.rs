//! Validation as a pluggable capability of the packaging pipeline.

use std::path::Path;

use skillpack_manifest::{SkillDirError, Violation, validate_skill_dir};

use crate::config::ValidationConfig;

/// Result of running a [`SkillCheck`] against a skill directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    Failed(Vec<Violation>),
    /// No validation ran; packaging may continue with a warning.
    Skipped(String),
}

pub trait SkillCheck {
    /// # Errors
    ///
    /// Returns an error when the directory or its manifest is missing.
    fn check(&self, skill_dir: &Path) -> Result<CheckOutcome, SkillDirError>;
}

/// Full manifest schema validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaCheck;

impl SkillCheck for SchemaCheck {
    fn check(&self, skill_dir: &Path) -> Result<CheckOutcome, SkillDirError> {
        let violations = validate_skill_dir(skill_dir)?;
        if violations.is_empty() {
            Ok(CheckOutcome::Passed)
        } else {
            Ok(CheckOutcome::Failed(violations))
        }
    }
}

/// Stand-in used when no validator is configured.
#[derive(Debug, Clone)]
pub struct UnavailableCheck {
    reason: String,
}

impl UnavailableCheck {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl SkillCheck for UnavailableCheck {
    fn check(&self, _skill_dir: &Path) -> Result<CheckOutcome, SkillDirError> {
        Ok(CheckOutcome::Skipped(self.reason.clone()))
    }
}

/// Pick the check implementation for a configuration.
#[must_use]
pub fn check_from_config(config: &ValidationConfig) -> Box<dyn SkillCheck> {
    if config.enabled {
        Box::new(SchemaCheck)
    } else {
        Box::new(UnavailableCheck::new("validation disabled in configuration"))
    }
}
