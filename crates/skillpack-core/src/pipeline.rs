//! Validate-then-archive packaging pipeline.

use std::path::{Path, PathBuf};

use skillpack_archive::Archiver;
use skillpack_manifest::{SkillDirError, Violation, locate_manifest, validate_skill_dir};

use crate::check::{CheckOutcome, SkillCheck, check_from_config};
use crate::config::PackConfig;
use crate::error::PackError;
use crate::report::{PackEvent, Reporter};

/// Where a packaging run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    PathChecked,
    Validated,
    ValidationSkipped,
    Packaged,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    Passed,
    Skipped,
}

#[derive(Debug, Clone)]
pub struct PackOutcome {
    pub archive: PathBuf,
    pub entries: Vec<String>,
    pub total_bytes: u64,
    pub validation: ValidationStatus,
}

pub struct Packager {
    check: Box<dyn SkillCheck>,
    archiver: Archiver,
    stage: Stage,
}

impl Packager {
    #[must_use]
    pub fn new(check: Box<dyn SkillCheck>, archiver: Archiver) -> Self {
        Self {
            check,
            archiver,
            stage: Stage::Start,
        }
    }

    #[must_use]
    pub fn from_config(config: &PackConfig) -> Self {
        Self::new(
            check_from_config(&config.validation),
            Archiver::new(config.archive_options()),
        )
    }

    /// Replace the validation capability, e.g. to skip validation for one run.
    #[must_use]
    pub fn with_check(mut self, check: Box<dyn SkillCheck>) -> Self {
        self.check = check;
        self
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Validate `skill_dir` and, if it passes, archive it into `output_dir`
    /// (the current directory when `None`).
    ///
    /// Every violation is reported before the run fails; no archive is written
    /// for an invalid skill.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Invalid`] when validation fails, and the underlying
    /// error for a missing directory or manifest or an archiving failure.
    pub fn package(
        &mut self,
        skill_dir: &Path,
        output_dir: Option<&Path>,
        reporter: &mut dyn Reporter,
    ) -> Result<PackOutcome, PackError> {
        self.advance(Stage::Start);
        let result = self.run(skill_dir, output_dir, reporter);
        if let Err(e) = &result {
            reporter.report(&PackEvent::Failed {
                reason: &e.to_string(),
            });
            self.advance(Stage::Failed);
        }
        result
    }

    fn run(
        &mut self,
        skill_dir: &Path,
        output_dir: Option<&Path>,
        reporter: &mut dyn Reporter,
    ) -> Result<PackOutcome, PackError> {
        locate_manifest(skill_dir)?;
        self.advance(Stage::PathChecked);

        reporter.report(&PackEvent::ValidationStarted { skill_dir });
        let validation = match self.check.check(skill_dir)? {
            CheckOutcome::Passed => {
                reporter.report(&PackEvent::ValidationPassed);
                self.advance(Stage::Validated);
                ValidationStatus::Passed
            }
            CheckOutcome::Failed(violations) => {
                for violation in &violations {
                    reporter.report(&PackEvent::Violation(violation));
                }
                return Err(PackError::Invalid(violations));
            }
            CheckOutcome::Skipped(reason) => {
                tracing::warn!(skill_dir = %skill_dir.display(), "validation skipped: {reason}");
                reporter.report(&PackEvent::ValidationSkipped { reason: &reason });
                self.advance(Stage::ValidationSkipped);
                ValidationStatus::Skipped
            }
        };

        let output_dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().map_err(PackError::CurrentDir)?,
        };

        let summary = self.archiver.archive(skill_dir, &output_dir, |name| {
            reporter.report(&PackEvent::EntryAdded { name });
        })?;

        reporter.report(&PackEvent::Packaged {
            archive: &summary.path,
            entries: summary.entries.len(),
        });
        self.advance(Stage::Packaged);

        Ok(PackOutcome {
            archive: summary.path,
            entries: summary.entries,
            total_bytes: summary.total_bytes,
            validation,
        })
    }

    fn advance(&mut self, next: Stage) {
        tracing::debug!(from = ?self.stage, to = ?next, "stage transition");
        self.stage = next;
    }
}

/// Validate a skill directory on its own, reporting each violation.
///
/// # Errors
///
/// Returns an error when the directory or its manifest is missing.
pub fn validate(
    skill_dir: &Path,
    reporter: &mut dyn Reporter,
) -> Result<Vec<Violation>, SkillDirError> {
    reporter.report(&PackEvent::ValidationStarted { skill_dir });
    let violations = validate_skill_dir(skill_dir)?;
    if violations.is_empty() {
        reporter.report(&PackEvent::ValidationPassed);
    }
    for violation in &violations {
        reporter.report(&PackEvent::Violation(violation));
    }
    Ok(violations)
}
