//! Progress events emitted while validating and packaging.

use std::path::Path;

use skillpack_manifest::Violation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackEvent<'a> {
    ValidationStarted { skill_dir: &'a Path },
    Violation(&'a Violation),
    ValidationPassed,
    ValidationSkipped { reason: &'a str },
    EntryAdded { name: &'a str },
    Packaged { archive: &'a Path, entries: usize },
    Failed { reason: &'a str },
}

pub trait Reporter {
    fn report(&mut self, event: &PackEvent<'_>);
}

/// Forwards every event to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, event: &PackEvent<'_>) {
        match event {
            PackEvent::ValidationStarted { skill_dir } => {
                tracing::info!(skill_dir = %skill_dir.display(), "validating skill");
            }
            PackEvent::Violation(violation) => {
                tracing::warn!(kind = ?violation.kind, "{violation}");
            }
            PackEvent::ValidationPassed => tracing::info!("validation passed"),
            PackEvent::ValidationSkipped { reason } => {
                tracing::warn!("validation skipped: {reason}");
            }
            PackEvent::EntryAdded { name } => tracing::info!(entry = %name, "added"),
            PackEvent::Packaged { archive, entries } => {
                tracing::info!(archive = %archive.display(), entries, "package created");
            }
            PackEvent::Failed { reason } => tracing::error!("packaging failed: {reason}"),
        }
    }
}
