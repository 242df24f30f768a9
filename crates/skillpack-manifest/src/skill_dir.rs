use std::path::{Path, PathBuf};

use crate::error::SkillDirError;
use crate::schema::{Violation, ViolationKind, validate_manifest};

/// File name every skill directory must contain at its root.
pub const MANIFEST_FILE: &str = "SKILL.md";

/// Confirm `skill_dir` is a directory holding a `SKILL.md` and return the manifest path.
///
/// # Errors
///
/// Returns an error if the path is missing, is not a directory, or has no manifest.
pub fn locate_manifest(skill_dir: &Path) -> Result<PathBuf, SkillDirError> {
    if !skill_dir.exists() {
        return Err(SkillDirError::NotFound(skill_dir.to_path_buf()));
    }
    if !skill_dir.is_dir() {
        return Err(SkillDirError::NotADirectory(skill_dir.to_path_buf()));
    }
    let manifest = skill_dir.join(MANIFEST_FILE);
    if !manifest.is_file() {
        return Err(SkillDirError::MissingManifest(skill_dir.to_path_buf()));
    }
    Ok(manifest)
}

/// Validate a skill directory: its structure first, then the manifest header.
///
/// A manifest that cannot be read as UTF-8 text is reported as a single
/// violation rather than an error.
///
/// # Errors
///
/// Returns a [`SkillDirError`] when there is no manifest to validate.
pub fn validate_skill_dir(skill_dir: &Path) -> Result<Vec<Violation>, SkillDirError> {
    let manifest = locate_manifest(skill_dir)?;
    tracing::debug!(path = %manifest.display(), "validating manifest");

    match std::fs::read_to_string(&manifest) {
        Ok(content) => Ok(validate_manifest(&content)),
        Err(e) => Ok(vec![Violation::new(
            ViolationKind::UnreadableManifest,
            format!("cannot read {MANIFEST_FILE}: {e}"),
        )]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_skill(dir: &Path, content: &str) {
        std::fs::write(dir.join(MANIFEST_FILE), content).unwrap();
    }

    #[test]
    fn valid_skill_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), "---\nname: ok\ndescription: fine\n---\nbody");
        assert!(validate_skill_dir(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_skill_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, SkillDirError::NotFound(_)));
    }

    #[test]
    fn file_instead_of_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        let err = validate_skill_dir(&file).unwrap_err();
        assert!(matches!(err, SkillDirError::NotADirectory(_)));
    }

    #[test]
    fn missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_skill_dir(dir.path()).unwrap_err();
        assert!(matches!(err, SkillDirError::MissingManifest(_)));
        assert!(err.to_string().contains("SKILL.md not found"));
    }

    #[test]
    fn manifest_must_be_a_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(MANIFEST_FILE)).unwrap();
        let err = validate_skill_dir(dir.path()).unwrap_err();
        assert!(matches!(err, SkillDirError::MissingManifest(_)));
    }

    #[test]
    fn non_utf8_manifest_is_a_violation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), [0xff, 0xfe, 0x00]).unwrap();
        let violations = validate_skill_dir(dir.path()).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::UnreadableManifest);
    }

    #[test]
    fn malformed_manifest_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_skill(dir.path(), "name: ok\n");
        let violations = validate_skill_dir(dir.path()).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::MalformedHeader);
    }
}
