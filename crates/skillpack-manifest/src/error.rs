use std::path::PathBuf;

/// Structural problems with the frontmatter delimiters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    #[error("SKILL.md must start with a frontmatter block opened by ---")]
    MissingOpening,

    #[error("frontmatter block is not closed by a second --- line")]
    Unclosed,
}

/// Problems with the skill directory itself, detected before the manifest is parsed.
#[derive(Debug, thiserror::Error)]
pub enum SkillDirError {
    #[error("skill directory does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("SKILL.md not found in {}", .0.display())]
    MissingManifest(PathBuf),
}
