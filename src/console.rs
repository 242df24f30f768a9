use skillpack_core::{PackEvent, Reporter};

/// Prints progress for a human at a terminal.
#[derive(Debug, Default)]
pub(crate) struct ConsoleReporter {
    listed_violations: bool,
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: &PackEvent<'_>) {
        match event {
            PackEvent::ValidationStarted { skill_dir } => {
                println!("🔍 Validating skill: {}", skill_dir.display());
            }
            PackEvent::Violation(violation) => {
                if !self.listed_violations {
                    println!("❌ Validation errors found:");
                    self.listed_violations = true;
                }
                println!("  • {violation}");
            }
            PackEvent::ValidationPassed => println!("✅ Skill validation passed"),
            PackEvent::ValidationSkipped { reason } => {
                println!("⚠️  Warning: validation skipped ({reason})");
            }
            PackEvent::EntryAdded { name } => println!("  Added: {name}"),
            PackEvent::Packaged { archive, entries } => {
                println!("✅ Successfully created {} ({entries} files)", archive.display());
            }
            PackEvent::Failed { reason } => {
                if self.listed_violations {
                    println!("❌ Validation failed. Fix the errors above before packaging.");
                } else {
                    println!("❌ Error: {reason}");
                }
            }
        }
    }
}
