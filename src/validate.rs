use crate::error::Result;
use crate::formatting::FormatContext;
use crate::name;
use crate::operations::{Entry, list_entries};
use crate::registry::TagRegistry;
use log::debug;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Extension allow-list; empty means every file is considered.
    pub extensions: Vec<String>,
    /// Also require a 15-character identifier and a non-empty comment.
    pub strict: bool,
    /// Names skipped outright, such as the tag registry file itself.
    pub ignore: Vec<String>,
}

/// Outcome of one directory scan. Accumulated problems never abort the scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub total: usize,
    pub valid: usize,
    pub malformed: Vec<String>,
    /// Identifier -> every entry that carries it, only for groups of two or more.
    pub duplicates: BTreeMap<String, Vec<String>>,
    /// Entry -> its tags missing from the registry.
    pub undefined_tags: BTreeMap<String, Vec<String>>,
}

impl ValidationReport {
    pub fn has_malformed(&self) -> bool {
        !self.malformed.is_empty()
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }

    pub fn has_undefined_tags(&self) -> bool {
        !self.undefined_tags.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_malformed() && !self.has_duplicates() && !self.has_undefined_tags()
    }

    /// Number of entries that belong to some duplicate group.
    pub fn duplicate_entries(&self) -> usize {
        self.duplicates.values().map(Vec::len).sum()
    }

    /// Itemized problems, a count summary, then a verdict.
    pub fn render<W: Write>(&self, w: &mut W, ctx: &FormatContext) -> io::Result<()> {
        for entry in &self.malformed {
            writeln!(w, "{} {entry} (invalid format)", ctx.fail_mark())?;
        }
        for (id, entries) in &self.duplicates {
            for entry in entries {
                writeln!(
                    w,
                    "{} {entry} (duplicate timestamp: {})",
                    ctx.warn_mark(),
                    ctx.format_id(id)
                )?;
            }
        }
        for (entry, tags) in &self.undefined_tags {
            let tags: Vec<String> = tags.iter().map(|t| ctx.format_tag(t)).collect();
            writeln!(
                w,
                "{} {entry} (undefined tags: {})",
                ctx.warn_mark(),
                tags.join(", ")
            )?;
        }

        writeln!(w)?;
        writeln!(w, "{}", ctx.format_header("Validation Summary:"))?;
        writeln!(w, "  Total files: {}", self.total)?;
        writeln!(w, "  Valid: {}", self.valid)?;
        writeln!(w, "  Invalid: {}", self.malformed.len())?;
        writeln!(w, "  Duplicates: {}", self.duplicate_entries())?;
        writeln!(w, "  Undefined tags: {}", self.undefined_tags.len())?;

        if self.is_clean() {
            writeln!(w, "\n{} All files are properly formatted!", ctx.ok_mark())?;
            return Ok(());
        }
        if self.has_malformed() {
            writeln!(w, "\n{} Some files have invalid format.", ctx.fail_mark())?;
        }
        if self.has_duplicates() {
            writeln!(w, "\n{} Some files have duplicate timestamps.", ctx.warn_mark())?;
        }
        if self.has_undefined_tags() {
            writeln!(w, "\n{} Some files have undefined tags.", ctx.warn_mark())?;
        }
        Ok(())
    }
}

/// Classify one directory snapshot. Directories and entries outside the
/// extension filter are not counted at all.
pub fn check(
    entries: &[Entry],
    registry: &TagRegistry,
    opts: &CheckOptions,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut by_id: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let check_tags = !registry.is_empty();

    for entry in entries.iter().filter(|e| !e.is_dir) {
        if opts.ignore.contains(&entry.name)
            || !name::matches_extensions(&entry.name, &opts.extensions)
        {
            continue;
        }
        report.total += 1;

        let decoded = if opts.strict {
            name::decode_strict(&entry.name)
        } else {
            name::decode(&entry.name)
        };
        let record = match decoded {
            Ok(record) => record,
            Err(e) => {
                debug!("{e}");
                report.malformed.push(entry.name.clone());
                continue;
            }
        };

        report.valid += 1;
        if check_tags {
            let missing = registry.undefined(&record.tags);
            if !missing.is_empty() {
                report.undefined_tags.insert(
                    entry.name.clone(),
                    missing.into_iter().map(str::to_string).collect(),
                );
            }
        }
        by_id.entry(record.identifier).or_default().push(entry.name.clone());
    }

    report.duplicates = by_id.into_iter().filter(|(_, v)| v.len() > 1).collect();
    report
}

/// Snapshot `dir` and check it. A missing directory is fatal; registry
/// trouble is not.
pub fn validate_dir(
    dir: &Path,
    registry: &TagRegistry,
    opts: &CheckOptions,
) -> Result<ValidationReport> {
    let entries = list_entries(dir)?;
    Ok(check(&entries, registry, opts))
}
