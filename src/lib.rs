//! Manage self-describing file names of the form
//! `{timestamp}--{comment}__{tag1}_{tag2}.{extension}`.

pub mod args;
pub mod clock;
pub mod config;
pub mod error;
pub mod formatting;
pub mod markdown;
pub mod name;
pub mod operations;
pub mod prompt;
pub mod registry;
pub mod shared;
pub mod tag_editor;
pub mod validate;

pub use clock::IdentifierClock;
pub use error::{Error, Result};
pub use name::{Record, decode, encode, is_well_formed};
pub use registry::{TagDefinition, TagRegistry};
pub use validate::{CheckOptions, ValidationReport};

use args::CommandArgs;
use formatting::FormatContext;
use operations::GenerateOptions;
use prompt::TerminalPrompter;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

type CliResult = std::result::Result<ExitCode, Box<dyn std::error::Error>>;

pub fn entry() -> CliResult {
    config::init_logging();
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_help();
        return Ok(ExitCode::SUCCESS);
    }

    let cmd = args.remove(0);
    match cmd.as_str() {
        "generate" | "gen" => generate(args),
        "validate" => validate(args),
        "tag" => tag(args),
        "list" => list(args),
        "help" | "-h" | "--help" => {
            print_help();
            Ok(ExitCode::SUCCESS)
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_help();
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_help() {
    println!(
        "\
parakeet - timestamped, tagged file names
Usage:
  parakeet generate [dir] [-n|--dry-run] [-v|--verbose] [-e|--ext pdf,txt]
                                  Rename unformatted files to {{timestamp}}--{{name}}.{{ext}}
  parakeet validate [dir] [-e|--ext ...] [--strict] [--tags <file>] [--plain]
                                  Report malformed names, duplicate timestamps and undefined tags
  parakeet tag <file|id> [-s|--show] [-t|--set <tag>]... [--tags <file>]
                                  Show, set, or interactively edit a file's tags
  parakeet list [dir] [-e|--ext ...] [--markdown] [--plain]
                                  List formatted files as a table
  parakeet help                   Show this message

File name format:
  {{timestamp}}--{{comment}}__{{tag1}}_{{tag2}}.{{extension}}   e.g. 20250903T083109--meeting notes__work_urgent.md

Environment:
  PARAKEET_TAGS_FILE              Tag registry to use (default: tag.toml next to the files)
  NO_COLOR                        Disable colored output
  RUST_LOG                        Log level (default: warn)
"
    );
}

fn format_context(args: &CommandArgs) -> FormatContext {
    let ctx = FormatContext::from_env();
    if args.plain { FormatContext::new(false) } else { ctx }
}

/// Registry path for files in `dir`, plus the names to leave out of a scan
/// of `dir` so the registry file is not treated as a document.
fn registry_for(dir: &Path, args: &CommandArgs) -> (PathBuf, Vec<String>) {
    let path = config::registry_path(dir, args.tags_file.as_deref());
    let ignore = match (path.parent(), path.file_name()) {
        (Some(parent), Some(file)) if same_dir(parent, dir) => {
            vec![file.to_string_lossy().into_owned()]
        }
        _ => Vec::new(),
    };
    (path, ignore)
}

fn same_dir(a: &Path, b: &Path) -> bool {
    let a = if a.as_os_str().is_empty() { Path::new(".") } else { a };
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn generate(args: Vec<String>) -> CliResult {
    let args = CommandArgs::parse(args, "generate")?;
    let dir = args.target_dir();
    let (_, ignore) = registry_for(&dir, &args);
    let opts = GenerateOptions {
        dry_run: args.dry_run,
        verbose: args.verbose,
        extensions: args.extensions,
        ignore,
    };
    let mut stdout = io::stdout().lock();
    operations::generate_names(&dir, &opts, &IdentifierClock::system(), &mut stdout)?;
    Ok(ExitCode::SUCCESS)
}

fn validate(args: Vec<String>) -> CliResult {
    let args = CommandArgs::parse(args, "validate")?;
    let ctx = format_context(&args);
    let dir = args.target_dir();
    let (registry_path, ignore) = registry_for(&dir, &args);
    let registry = TagRegistry::load_or_empty(&registry_path);
    let opts = CheckOptions { extensions: args.extensions, strict: args.strict, ignore };

    let report = validate::validate_dir(&dir, &registry, &opts)?;
    report.render(&mut io::stdout().lock(), &ctx)?;
    if report.has_malformed() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn tag(args: Vec<String>) -> CliResult {
    let args = CommandArgs::parse(args, "tag")?;
    let ctx = format_context(&args);
    let target = args
        .positional
        .first()
        .map(PathBuf::from)
        .ok_or("Usage: parakeet tag <file|id> [--show] [--set <tag>]...")?;
    let mut stdout = io::stdout().lock();

    if args.show {
        operations::show_tags(&target, &mut stdout, &ctx)?;
    } else if !args.set_tags.is_empty() {
        operations::set_tags_on_file(&target, &args.set_tags, &mut stdout, &ctx)?;
    } else {
        let file = operations::resolve_file(&target)?;
        let dir = match file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let (registry_path, _) = registry_for(&dir, &args);
        let registry = TagRegistry::load_or_empty(&registry_path);
        operations::edit_tags_on_file(
            &file,
            &registry,
            &mut TerminalPrompter,
            &mut stdout,
            &ctx,
        )?;
    }
    Ok(ExitCode::SUCCESS)
}

fn list(args: Vec<String>) -> CliResult {
    let args = CommandArgs::parse(args, "list")?;
    let ctx = format_context(&args);
    let dir = args.target_dir();
    let records = operations::list_records(&dir, &args.extensions)?;

    if args.markdown {
        print!("{}", markdown::records_table(&records));
        return Ok(ExitCode::SUCCESS);
    }
    if records.is_empty() {
        println!("No formatted files in {}.", dir.display());
        return Ok(ExitCode::SUCCESS);
    }
    let width = shared::table::terminal_columns().unwrap_or(120).max(40);
    println!("{}", shared::table::records_table(&records, &ctx, width));
    Ok(ExitCode::SUCCESS)
}
