//! Flat `key: value` frontmatter parsing for SKILL.md.

use crate::error::HeaderError;

/// Line that opens and closes the frontmatter block.
pub const MARKER: &str = "---";

/// Parsed frontmatter: raw string values keyed by field name.
///
/// Keys keep the position of their first occurrence; a repeated key
/// overwrites the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    fields: Vec<(String, String)>,
    body_offset: usize,
}

impl Header {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Field names in encounter order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Byte offset of the first character after the closing marker line.
    #[must_use]
    pub fn body_offset(&self) -> usize {
        self.body_offset
    }

    fn insert(&mut self, key: &str, value: &str) {
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| k == key) {
            value.clone_into(&mut slot.1);
        } else {
            self.fields.push((key.to_owned(), value.to_owned()));
        }
    }
}

fn is_marker(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r']) == MARKER
}

/// Parse the frontmatter block at the top of a SKILL.md document.
///
/// Every non-empty line holding a `:` is trimmed and split on its first `:`,
/// whatever its indentation. Lines without a separator are ignored.
///
/// # Errors
///
/// Returns [`HeaderError::MissingOpening`] if the first line is not `---`, and
/// [`HeaderError::Unclosed`] if no second `---` line follows.
pub fn parse_header(content: &str) -> Result<Header, HeaderError> {
    let mut lines = content.split_inclusive('\n');
    if !lines.next().is_some_and(is_marker) {
        return Err(HeaderError::MissingOpening);
    }

    let mut header = Header::default();
    let mut offset = content
        .find('\n')
        .map_or(content.len(), |newline| newline + 1);

    for line in lines {
        offset += line.len();
        if is_marker(line) {
            header.body_offset = offset;
            return Ok(header);
        }

        if let Some((key, value)) = line.trim().split_once(':') {
            header.insert(key.trim(), value.trim());
        }
    }

    Err(HeaderError::Unclosed)
}
