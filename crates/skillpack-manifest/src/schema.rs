//! Field rules for SKILL.md frontmatter.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::HeaderError;
use crate::frontmatter::{Header, parse_header};

pub const MAX_NAME_LEN: usize = 64;
pub const MAX_DESCRIPTION_LEN: usize = 1024;

/// Prefix left behind by skill templates that still need filling in.
pub const PLACEHOLDER_PREFIX: &str = "[TODO";

/// Every key a frontmatter block may carry.
pub const ALLOWED_FIELDS: &[&str] = &["name", "description", "license", "allowed-tools", "metadata"];

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// Which rule a [`Violation`] breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    MalformedHeader,
    UnreadableManifest,
    MissingName,
    InvalidNameFormat,
    NameTooLong,
    MissingDescription,
    PlaceholderDescription,
    DescriptionTooLong,
    AngleBrackets,
    UnexpectedFields,
}

impl ViolationKind {
    /// Whether the violation concerns the `description` field's content.
    #[must_use]
    pub fn is_description_format(self) -> bool {
        matches!(
            self,
            Self::PlaceholderDescription | Self::DescriptionTooLong | Self::AngleBrackets
        )
    }

    #[must_use]
    pub fn is_name_format(self) -> bool {
        matches!(self, Self::InvalidNameFormat | Self::NameTooLong)
    }
}

/// One broken rule, with a message meant for the skill author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<HeaderError> for Violation {
    fn from(err: HeaderError) -> Self {
        Self::new(ViolationKind::MalformedHeader, err.to_string())
    }
}

/// Validate the raw text of a SKILL.md file.
///
/// A malformed frontmatter block yields exactly one violation and no field
/// checks. Otherwise every rule runs and each failure is reported. An empty
/// result means the manifest is valid.
#[must_use]
pub fn validate_manifest(content: &str) -> Vec<Violation> {
    match parse_header(content) {
        Ok(header) => validate_header(&header),
        Err(err) => vec![err.into()],
    }
}

/// Run every field rule against an already parsed header.
#[must_use]
pub fn validate_header(header: &Header) -> Vec<Violation> {
    let mut violations = Vec::new();

    match header.get("name") {
        Some(name) => check_name(name, &mut violations),
        None => violations.push(Violation::new(
            ViolationKind::MissingName,
            "missing required field 'name' in frontmatter",
        )),
    }

    match header.get("description") {
        Some(description) => check_description(description, &mut violations),
        None => violations.push(Violation::new(
            ViolationKind::MissingDescription,
            "missing required field 'description' in frontmatter",
        )),
    }

    let unexpected: Vec<&str> = header
        .keys()
        .filter(|key| !ALLOWED_FIELDS.contains(key))
        .collect();
    if !unexpected.is_empty() {
        violations.push(Violation::new(
            ViolationKind::UnexpectedFields,
            format!(
                "unexpected fields in frontmatter: {} (allowed: {})",
                unexpected.join(", "),
                ALLOWED_FIELDS.join(", ")
            ),
        ));
    }

    violations
}

fn check_name(name: &str, violations: &mut Vec<Violation>) {
    if !NAME_RE.is_match(name) {
        violations.push(Violation::new(
            ViolationKind::InvalidNameFormat,
            format!("invalid name '{name}': use lowercase letters, digits and hyphens only"),
        ));
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        violations.push(Violation::new(
            ViolationKind::NameTooLong,
            format!("name is {len} characters long, maximum is {MAX_NAME_LEN}"),
        ));
    }
}

fn check_description(description: &str, violations: &mut Vec<Violation>) {
    if description.starts_with(PLACEHOLDER_PREFIX) {
        violations.push(Violation::new(
            ViolationKind::PlaceholderDescription,
            "description still contains a TODO placeholder",
        ));
    }
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        violations.push(Violation::new(
            ViolationKind::DescriptionTooLong,
            format!("description is {len} characters long, maximum is {MAX_DESCRIPTION_LEN}"),
        ));
    }
    if description.contains(['<', '>']) {
        violations.push(Violation::new(
            ViolationKind::AngleBrackets,
            "description must not contain angle brackets (< or >)",
        ));
    }
}
