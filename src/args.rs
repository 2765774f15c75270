use std::error::Error;
use std::path::PathBuf;

/// Flags shared by the subcommands. Each command reads the ones it cares
/// about; unknown flags are rejected at parse time.
#[derive(Default, Debug)]
pub struct CommandArgs {
    pub positional: Vec<String>,
    pub dry_run: bool,
    pub verbose: bool,
    pub extensions: Vec<String>,
    pub strict: bool,
    pub markdown: bool,
    pub plain: bool,
    pub show: bool,
    pub set_tags: Vec<String>,
    pub tags_file: Option<PathBuf>,
}

impl CommandArgs {
    pub fn parse(
        args: Vec<String>,
        command_name: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let mut parsed = Self::default();
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-n" | "--dry-run" => parsed.dry_run = true,
                "-v" | "--verbose" => parsed.verbose = true,
                "--strict" => parsed.strict = true,
                "--markdown" => parsed.markdown = true,
                "--plain" => parsed.plain = true,
                "-s" | "--show" => parsed.show = true,
                "-e" | "--ext" => {
                    let v = value(&mut iter, &arg, command_name)?;
                    parsed.extensions.extend(split_extensions(&v));
                }
                "-t" | "--set" => {
                    parsed.set_tags.push(value(&mut iter, &arg, command_name)?);
                }
                "--tags" => {
                    let v = value(&mut iter, &arg, command_name)?;
                    parsed.tags_file = Some(PathBuf::from(v));
                }
                other if other.starts_with('-') && other.len() > 1 => {
                    return Err(format!(
                        "Unknown flag for {command_name}: {other}"
                    )
                    .into());
                }
                _ => parsed.positional.push(arg),
            }
        }
        Ok(parsed)
    }

    /// First positional argument, or the current directory.
    pub fn target_dir(&self) -> PathBuf {
        PathBuf::from(self.positional.first().map_or(".", String::as_str))
    }
}

fn value(
    iter: &mut std::vec::IntoIter<String>,
    flag: &str,
    command_name: &str,
) -> Result<String, Box<dyn Error>> {
    iter.next().ok_or_else(|| {
        format!("Provide a value after {flag} for {command_name}").into()
    })
}

/// `pdf,.TXT, md` -> `["pdf", "TXT", "md"]`.
pub fn split_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().trim_start_matches('.'))
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_flags_and_positionals() {
        let parsed = CommandArgs::parse(
            args(&["docs", "-n", "--ext", "pdf,txt", "-e", ".md", "-v"]),
            "generate",
        )
        .unwrap();
        assert!(parsed.dry_run);
        assert!(parsed.verbose);
        assert_eq!(parsed.extensions, vec!["pdf", "txt", "md"]);
        assert_eq!(parsed.target_dir(), PathBuf::from("docs"));
    }

    #[test]
    fn repeated_set_collects_tags() {
        let parsed = CommandArgs::parse(
            args(&["file.md", "--set", "a", "-t", "b"]),
            "tag",
        )
        .unwrap();
        assert_eq!(parsed.set_tags, vec!["a", "b"]);
        assert_eq!(parsed.positional, vec!["file.md"]);
    }

    #[test]
    fn missing_value_and_unknown_flag_error() {
        assert!(CommandArgs::parse(args(&["--ext"]), "validate").is_err());
        let err = CommandArgs::parse(args(&["--bogus"]), "validate").unwrap_err();
        assert!(err.to_string().contains("Unknown flag for validate"));
    }

    #[test]
    fn defaults_to_current_dir() {
        let parsed = CommandArgs::parse(Vec::new(), "validate").unwrap();
        assert_eq!(parsed.target_dir(), PathBuf::from("."));
        assert!(parsed.tags_file.is_none());
    }
}
