use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use chrono::{Datelike, Timelike};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{ArchiveError, Result};

pub const DEFAULT_EXTENSION: &str = "skill";

/// Knobs for how archives are named and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// File extension of the produced archive, without the leading dot.
    pub extension: String,
    /// Write entries in lexical order of their archive path instead of walk order.
    pub sort_entries: bool,
    /// Stamp entries with the source file's mtime instead of the zip epoch.
    pub preserve_mtime: bool,
    /// Deflate level (1-9); `None` uses the library default.
    pub compression_level: Option<i64>,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_owned(),
            sort_entries: true,
            preserve_mtime: true,
            compression_level: None,
        }
    }
}

/// A regular file scheduled for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path inside the archive, `/`-separated and prefixed by the skill directory name.
    pub name: String,
    pub source: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub entries: Vec<String>,
    pub total_bytes: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Archiver {
    options: ArchiveOptions,
}

impl Archiver {
    #[must_use]
    pub fn new(options: ArchiveOptions) -> Self {
        Self { options }
    }

    /// Archive file name for a skill directory, e.g. `pdf-tools.skill`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be resolved or has no final component.
    pub fn archive_file_name(&self, skill_dir: &Path) -> Result<String> {
        let root = skill_dir
            .canonicalize()
            .map_err(ArchiveError::io(skill_dir))?;
        let name = skill_name(&root)?;
        Ok(format!("{name}.{}", self.options.extension))
    }

    /// Enumerate every regular file under `skill_dir`.
    ///
    /// Hidden files are included and ignore files are not honored. Symbolic
    /// links are not followed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be walked or a path is not UTF-8.
    pub fn collect_entries(&self, skill_dir: &Path) -> Result<Vec<ArchiveEntry>> {
        let root = skill_dir
            .canonicalize()
            .map_err(ArchiveError::io(skill_dir))?;
        let base = root
            .parent()
            .ok_or_else(|| ArchiveError::InvalidSkillDir(root.clone()))?;

        let walker = ignore::WalkBuilder::new(&root)
            .standard_filters(false)
            .follow_links(false)
            .build();

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry?;
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_dir() {
                continue;
            }
            if !file_type.is_file() {
                tracing::debug!(path = %entry.path().display(), "skipping non-regular file");
                continue;
            }
            entries.push(ArchiveEntry {
                name: entry_name(base, entry.path())?,
                source: entry.into_path(),
            });
        }

        if self.options.sort_entries {
            entries.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(entries)
    }

    /// Write `skill_dir` into `<output_dir>/<name>.<extension>`.
    ///
    /// `output_dir` is created if absent. The archive is assembled in a
    /// temporary file beside the destination and renamed into place once
    /// complete, so a failure never leaves a partial archive behind.
    /// `on_entry` is called with each archive path after it is written.
    ///
    /// # Errors
    ///
    /// Returns an error on any failure reading sources or writing the archive.
    pub fn archive(
        &self,
        skill_dir: &Path,
        output_dir: &Path,
        mut on_entry: impl FnMut(&str),
    ) -> Result<ArchiveSummary> {
        std::fs::create_dir_all(output_dir).map_err(ArchiveError::io(output_dir))?;
        let output_dir = output_dir
            .canonicalize()
            .map_err(ArchiveError::io(output_dir))?;
        let dest = output_dir.join(self.archive_file_name(skill_dir)?);

        let entries: Vec<ArchiveEntry> = self
            .collect_entries(skill_dir)?
            .into_iter()
            .filter(|entry| entry.source != dest)
            .collect();

        let mut builder = tempfile::Builder::new();
        builder.prefix(".skillpack-").suffix(".partial");
        // Temp files default to 0600; the finished archive should carry ordinary file modes.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o644));
        }
        let tmp = builder
            .tempfile_in(&output_dir)
            .map_err(ArchiveError::io(&output_dir))?;

        let total_bytes = self.write_entries(tmp.as_file(), tmp.path(), &entries, &mut on_entry)?;
        tmp.as_file().sync_all().map_err(ArchiveError::io(tmp.path()))?;
        tmp.persist(&dest).map_err(|e| ArchiveError::Io {
            path: dest.clone(),
            source: e.error,
        })?;

        tracing::debug!(path = %dest.display(), entries = entries.len(), total_bytes, "archive written");
        Ok(ArchiveSummary {
            path: dest,
            entries: entries.into_iter().map(|entry| entry.name).collect(),
            total_bytes,
        })
    }

    fn write_entries(
        &self,
        file: &File,
        path: &Path,
        entries: &[ArchiveEntry],
        on_entry: &mut impl FnMut(&str),
    ) -> Result<u64> {
        let mut zip = ZipWriter::new(BufWriter::new(file));
        let mut total_bytes = 0;

        for entry in entries {
            let mut source = File::open(&entry.source).map_err(ArchiveError::io(&entry.source))?;
            let metadata = source.metadata().map_err(ArchiveError::io(&entry.source))?;

            zip.start_file(entry.name.as_str(), self.file_options(&metadata))?;
            total_bytes += std::io::copy(&mut source, &mut zip).map_err(ArchiveError::io(&entry.source))?;

            tracing::debug!(entry = %entry.name, size = metadata.len(), "added");
            on_entry(&entry.name);
        }

        let mut writer = zip.finish()?;
        writer.flush().map_err(ArchiveError::io(path))?;
        Ok(total_bytes)
    }

    fn file_options(&self, metadata: &std::fs::Metadata) -> SimpleFileOptions {
        let modified = if self.options.preserve_mtime {
            metadata.modified().ok().and_then(zip_timestamp)
        } else {
            None
        };

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(self.options.compression_level)
            .last_modified_time(modified.unwrap_or_default());

        #[cfg(unix)]
        let options = {
            use std::os::unix::fs::PermissionsExt;
            options.unix_permissions(metadata.permissions().mode())
        };

        options
    }
}

/// Archive path of `path` relative to `base`, joined with `/`.
///
/// # Errors
///
/// Returns an error if `path` is not under `base` or is not valid UTF-8.
pub fn entry_name(base: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(base)
        .map_err(|_| ArchiveError::InvalidSkillDir(path.to_path_buf()))?;

    let mut parts = Vec::new();
    for component in relative.components() {
        let Component::Normal(part) = component else {
            return Err(ArchiveError::InvalidSkillDir(path.to_path_buf()));
        };
        let part = part
            .to_str()
            .ok_or_else(|| ArchiveError::NonUtf8Path(path.to_path_buf()))?;
        parts.push(part);
    }
    Ok(parts.join("/"))
}

fn skill_name(root: &Path) -> Result<&str> {
    root.file_name()
        .ok_or_else(|| ArchiveError::InvalidSkillDir(root.to_path_buf()))?
        .to_str()
        .ok_or_else(|| ArchiveError::NonUtf8Path(root.to_path_buf()))
}

/// Convert a file time to a zip timestamp (UTC). Times outside 1980-2107 yield `None`.
fn zip_timestamp(time: SystemTime) -> Option<zip::DateTime> {
    let utc = chrono::DateTime::<chrono::Utc>::from(time);
    zip::DateTime::from_date_and_time(
        u16::try_from(utc.year()).ok()?,
        u8::try_from(utc.month()).ok()?,
        u8::try_from(utc.day()).ok()?,
        u8::try_from(utc.hour()).ok()?,
        u8::try_from(utc.minute()).ok()?,
        u8::try_from(utc.second()).ok()?,
    )
    .ok()
}
