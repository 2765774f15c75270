//! Filename grammar: `{identifier}--{comment}__{tag1}_{tag2}.{extension}`.
//!
//! The grammar has no escaping. A comment containing `__` or a tag containing
//! `_` will not survive a round trip; authoring paths reject such tags, and
//! decoding simply applies the splits as written.

use crate::error::{Error, Result};
use std::fmt;

/// Separates the identifier from the comment.
pub const ID_DELIM: &str = "--";
/// Separates the comment from each tag group.
pub const TAG_GROUP_DELIM: &str = "__";
/// Separates tags within a group.
pub const TAG_DELIM: &str = "_";
/// Canonical identifier width (`YYYYMMDDTHHMMSS`).
pub const ID_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub identifier: String,
    pub comment: String,
    pub tags: Vec<String>,
    pub extension: String,
}

impl Record {
    pub fn new(
        identifier: impl Into<String>,
        comment: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            comment: comment.into(),
            tags: Vec::new(),
            extension: extension.into(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Tags as a sorted, deduplicated list.
    pub fn tag_set(&self) -> Vec<String> {
        let mut set = self.tags.clone();
        set.sort();
        set.dedup();
        set
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{ID_DELIM}{}", self.identifier, self.comment)?;
        if !self.tags.is_empty() {
            write!(f, "{TAG_GROUP_DELIM}{}", self.tags.join(TAG_DELIM))?;
        }
        if !self.extension.is_empty() {
            write!(f, ".{}", self.extension)?;
        }
        Ok(())
    }
}

pub fn encode(record: &Record) -> String {
    record.to_string()
}

pub fn decode(name: &str) -> Result<Record> {
    let (base, extension) = split_extension(name);
    let mut groups = base.split(TAG_GROUP_DELIM);
    let head = groups.next().unwrap_or_default();
    let Some((identifier, comment)) = head.split_once(ID_DELIM) else {
        return Err(Error::MalformedName {
            name: name.to_string(),
            reason: "missing `--` between identifier and comment",
        });
    };

    // Every group after the first is a tag cluster; all of them flatten into
    // one list in order of appearance.
    let tags = groups
        .flat_map(|group| group.split(TAG_DELIM))
        .map(str::to_string)
        .collect();

    Ok(Record {
        identifier: identifier.to_string(),
        comment: comment.to_string(),
        tags,
        extension: extension.to_string(),
    })
}

pub fn is_well_formed(name: &str) -> bool {
    decode(name).is_ok()
}

/// Decode and additionally require a canonical-width identifier and a
/// non-empty comment.
pub fn decode_strict(name: &str) -> Result<Record> {
    let record = decode(name)?;
    if record.identifier.len() != ID_LEN {
        return Err(Error::MalformedName {
            name: name.to_string(),
            reason: "identifier must be 15 characters",
        });
    }
    if record.comment.is_empty() {
        return Err(Error::MalformedName {
            name: name.to_string(),
            reason: "comment cannot be empty",
        });
    }
    Ok(record)
}

/// Split at the last `.`; the extension is returned without the dot.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => (&name[..idx], &name[idx + 1..]),
        None => (name, ""),
    }
}

/// True when `extensions` is empty or contains the name's extension,
/// compared case-insensitively.
pub fn matches_extensions(name: &str, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    let ext = split_extension(name).1.to_lowercase();
    extensions.iter().any(|e| e.to_lowercase() == ext)
}
