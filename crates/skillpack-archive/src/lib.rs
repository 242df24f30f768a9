//! Packs a skill directory into a single deflate-compressed `.skill` archive.

mod archiver;
mod error;

pub use archiver::{
    ArchiveEntry, ArchiveOptions, ArchiveSummary, Archiver, DEFAULT_EXTENSION, entry_name,
};
pub use error::{ArchiveError, Result};
