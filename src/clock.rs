use crate::name;
use crate::operations::Entry;
use chrono::{Duration, Local, NaiveDateTime};
use std::collections::HashSet;

pub const ID_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Source of timestamp identifiers: the system clock, or a fixed instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierClock {
    fixed: Option<NaiveDateTime>,
}

impl IdentifierClock {
    pub fn system() -> Self {
        Self { fixed: None }
    }

    pub fn fixed(at: NaiveDateTime) -> Self {
        Self { fixed: Some(at) }
    }

    fn instant(&self) -> NaiveDateTime {
        self.fixed.unwrap_or_else(|| Local::now().naive_local())
    }

    pub fn now(&self) -> String {
        format_identifier(self.instant())
    }

    /// First identifier at or after the current second that is not in
    /// `existing`, stepping forward one second at a time.
    pub fn unique(&self, existing: &HashSet<String>) -> String {
        let mut at = self.instant();
        let mut candidate = format_identifier(at);
        while existing.contains(&candidate) {
            at += Duration::seconds(1);
            candidate = format_identifier(at);
        }
        candidate
    }
}

pub fn format_identifier(at: NaiveDateTime) -> String {
    at.format(ID_FORMAT).to_string()
}

pub fn parse_identifier(id: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(id, ID_FORMAT).ok()
}

/// Identifiers of every well-formed file entry. Malformed names and
/// directories are skipped silently.
pub fn collect_existing(entries: &[Entry]) -> HashSet<String> {
    entries
        .iter()
        .filter(|e| !e.is_dir)
        .filter_map(|e| name::decode(&e.name).ok())
        .map(|r| r.identifier)
        .collect()
}
