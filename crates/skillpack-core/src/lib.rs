//! Packaging pipeline: validate a skill directory, then archive it.

pub mod check;
pub mod config;
mod error;
pub mod pipeline;
pub mod report;

pub use check::{CheckOutcome, SchemaCheck, SkillCheck, UnavailableCheck};
pub use config::PackConfig;
pub use error::{ConfigError, PackError};
pub use pipeline::{PackOutcome, Packager, Stage, ValidationStatus, validate};
pub use report::{PackEvent, Reporter, TracingReporter};
