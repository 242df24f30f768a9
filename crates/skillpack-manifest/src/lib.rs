//! SKILL.md frontmatter parser, schema rules, and skill directory checks.

mod error;
pub mod frontmatter;
pub mod schema;
pub mod skill_dir;

pub use error::{HeaderError, SkillDirError};
pub use frontmatter::{Header, parse_header};
pub use schema::{Violation, ViolationKind, validate_header, validate_manifest};
pub use skill_dir::{MANIFEST_FILE, locate_manifest, validate_skill_dir};
