use crate::clock::{IdentifierClock, collect_existing, parse_identifier};
use crate::error::{Error, Result};
use crate::formatting::FormatContext;
use crate::name::{self, Record};
use crate::prompt::TagPrompter;
use crate::registry::TagRegistry;
use crate::tag_editor;
use log::{debug, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One name from a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
}

impl Entry {
    pub fn file(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_dir: false }
    }
}

/// Snapshot of `dir`, sorted by name.
pub fn list_entries(dir: &Path) -> Result<Vec<Entry>> {
    if !dir.exists() {
        return Err(Error::TargetMissing { path: dir.to_path_buf() });
    }
    let read_err = |e| Error::io("failed to read directory", dir, e);
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let is_dir = entry.file_type().map_err(read_err)?.is_dir();
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!("skipping entry with a non-UTF-8 name: {raw:?}");
                continue;
            }
        };
        entries.push(Entry { name, is_dir });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Decoded records of the well-formed files in `dir` that pass the
/// extension filter, in listing order.
pub fn list_records(dir: &Path, extensions: &[String]) -> Result<Vec<Record>> {
    Ok(list_entries(dir)?
        .into_iter()
        .filter(|e| !e.is_dir && name::matches_extensions(&e.name, extensions))
        .filter_map(|e| name::decode(&e.name).ok())
        .collect())
}

/// The single well-formed file in `dir` whose identifier is `id`.
pub fn find_by_id(dir: &Path, id: &str) -> Result<PathBuf> {
    let mut matches: Vec<PathBuf> = list_entries(dir)?
        .into_iter()
        .filter(|e| !e.is_dir)
        .filter(|e| name::decode(&e.name).is_ok_and(|r| r.identifier == id))
        .map(|e| dir.join(e.name))
        .collect();
    if matches.len() > 1 {
        return Err(Error::AmbiguousIdentifier {
            id: id.to_string(),
            matches: matches.iter().map(|p| p.display().to_string()).collect(),
        });
    }
    matches.pop().ok_or_else(|| Error::TargetMissing { path: dir.join(id) })
}

/// Accept either a path to an existing file or an identifier, which is looked
/// up in the directory it names (the current directory for a bare id).
pub fn resolve_file(target: &Path) -> Result<PathBuf> {
    if target.exists() {
        if target.is_dir() {
            return Err(Error::NotAFile { path: target.to_path_buf() });
        }
        return Ok(target.to_path_buf());
    }
    let id = target.file_name().and_then(|s| s.to_str()).unwrap_or_default();
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if id.is_empty() || !dir.exists() {
        return Err(Error::TargetMissing { path: target.to_path_buf() });
    }
    find_by_id(dir, id).map_err(|e| match e {
        Error::TargetMissing { .. } => {
            Error::TargetMissing { path: target.to_path_buf() }
        }
        other => other,
    })
}

fn split_path(path: &Path) -> (PathBuf, String) {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    (dir, file_name)
}

/// Rename `old_name` in `dir` to the encoding of `record`. Never overwrites.
pub fn rename_record(dir: &Path, old_name: &str, record: &Record) -> Result<String> {
    let new_name = name::encode(record);
    let new_path = dir.join(&new_name);
    if new_name != old_name && new_path.exists() {
        return Err(Error::RenameCollision { path: new_path });
    }
    fs::rename(dir.join(old_name), &new_path)
        .map_err(|e| Error::io("failed to rename", dir.join(old_name), e))?;
    Ok(new_name)
}

/// Print the decoded parts of a file name.
pub fn show_tags<W: Write>(path: &Path, w: &mut W, ctx: &FormatContext) -> Result<()> {
    let path = resolve_file(path)?;
    let (_, file_name) = split_path(&path);
    let record = name::decode(&file_name)?;

    let out = |e| Error::io("failed to write", "<stdout>", e);
    writeln!(w, "File: {file_name}").map_err(out)?;
    match parse_identifier(&record.identifier) {
        Some(at) => writeln!(
            w,
            "Timestamp: {} ({})",
            ctx.format_id(&record.identifier),
            at.format("%Y-%m-%d %H:%M:%S")
        ),
        None => writeln!(w, "Timestamp: {}", ctx.format_id(&record.identifier)),
    }
    .map_err(out)?;
    writeln!(w, "Comment: {}", record.comment).map_err(out)?;
    if record.tags.is_empty() {
        writeln!(w, "Tags: (none)").map_err(out)?;
    } else {
        let tags: Vec<String> = record.tags.iter().map(|t| ctx.format_tag(t)).collect();
        writeln!(w, "Tags: {}", tags.join(", ")).map_err(out)?;
    }
    Ok(())
}

/// Replace a file's tags with `tags`, renaming only when the set changes.
/// Returns the new file name when a rename happened.
pub fn set_tags_on_file<W: Write>(
    path: &Path,
    tags: &[String],
    w: &mut W,
    ctx: &FormatContext,
) -> Result<Option<String>> {
    let tags = tags
        .iter()
        .map(|t| tag_editor::validate_tag(t))
        .collect::<Result<Vec<_>>>()?;
    let path = resolve_file(path)?;
    let (dir, file_name) = split_path(&path);
    let record = name::decode(&file_name)?;
    apply_tags(&dir, &file_name, &record, tags, w, ctx)
}

/// Run the interactive editor against a file's current tags, then rename if
/// the selection changed them.
pub fn edit_tags_on_file<W: Write>(
    path: &Path,
    registry: &TagRegistry,
    prompter: &mut dyn TagPrompter,
    w: &mut W,
    ctx: &FormatContext,
) -> Result<Option<String>> {
    let path = resolve_file(path)?;
    let (dir, file_name) = split_path(&path);
    let record = name::decode(&file_name)?;
    let tags = tag_editor::edit_tags(&record.tags, registry, prompter)?;
    apply_tags(&dir, &file_name, &record, tags, w, ctx)
}

fn apply_tags<W: Write>(
    dir: &Path,
    file_name: &str,
    record: &Record,
    tags: Vec<String>,
    w: &mut W,
    ctx: &FormatContext,
) -> Result<Option<String>> {
    let out = |e| Error::io("failed to write", "<stdout>", e);
    let (updated, changed) = tag_editor::set_tags(record, tags);
    if !changed {
        writeln!(w, "{} No changes made", ctx.ok_mark()).map_err(out)?;
        return Ok(None);
    }
    let new_name = rename_record(dir, file_name, &updated)?;
    writeln!(w, "{} Renamed: {file_name} → {new_name}", ctx.ok_mark()).map_err(out)?;
    Ok(Some(new_name))
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub dry_run: bool,
    pub verbose: bool,
    pub extensions: Vec<String>,
    /// Names never renamed, such as the tag registry file.
    pub ignore: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Give every unformatted file in `dir` a fresh identifier, keeping its stem
/// as the comment. Identifiers are unique across the directory, including
/// ones assigned earlier in the same run. A failure on one file is reported
/// and the rest continue.
pub fn generate_names<W: Write>(
    dir: &Path,
    opts: &GenerateOptions,
    clock: &IdentifierClock,
    w: &mut W,
) -> Result<GenerateSummary> {
    let entries = list_entries(dir)?;
    rename_snapshot(dir, &entries, opts, clock, w)
}

/// Batch rename over one listing of `dir`. Entries that vanished since the
/// listing was taken fail individually.
fn rename_snapshot<W: Write>(
    dir: &Path,
    entries: &[Entry],
    opts: &GenerateOptions,
    clock: &IdentifierClock,
    w: &mut W,
) -> Result<GenerateSummary> {
    let mut existing = collect_existing(entries);
    let mut summary = GenerateSummary::default();
    let out = |e| Error::io("failed to write", "<stdout>", e);

    for entry in entries.iter().filter(|e| !e.is_dir) {
        let old_name = entry.name.as_str();
        if opts.ignore.contains(&entry.name)
            || !name::matches_extensions(old_name, &opts.extensions)
        {
            continue;
        }
        if name::is_well_formed(old_name) {
            debug!("already formatted: {old_name}");
            if opts.verbose {
                writeln!(w, "Skipped (already formatted): {old_name}").map_err(out)?;
            }
            summary.skipped += 1;
            continue;
        }

        let (stem, extension) = name::split_extension(old_name);
        let record = Record::new(clock.unique(&existing), stem, extension);
        let new_name = name::encode(&record);

        if dir.join(&new_name).exists() {
            writeln!(w, "Warning: target file already exists, skipping: {new_name}")
                .map_err(out)?;
            summary.skipped += 1;
            continue;
        }

        if opts.dry_run {
            writeln!(w, "[DRY RUN] Would rename: {old_name} -> {new_name}").map_err(out)?;
        } else {
            if let Err(e) = rename_record(dir, old_name, &record) {
                warn!("{e}");
                writeln!(w, "Error renaming {old_name}: {e}").map_err(out)?;
                summary.failed += 1;
                continue;
            }
            if opts.verbose {
                writeln!(w, "Renamed: {old_name} -> {new_name}").map_err(out)?;
            }
        }
        existing.insert(record.identifier);
        summary.processed += 1;
    }

    writeln!(w, "\nSummary:").map_err(out)?;
    writeln!(w, "  Processed: {}", summary.processed).map_err(out)?;
    writeln!(w, "  Skipped: {}", summary.skipped).map_err(out)?;
    if summary.failed > 0 {
        writeln!(w, "  Failed: {}", summary.failed).map_err(out)?;
    }
    if opts.dry_run {
        writeln!(w, "  (Dry run - no files were actually renamed)").map_err(out)?;
    }
    Ok(summary)
}
