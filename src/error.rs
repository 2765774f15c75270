use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid filename format: {name} ({reason})")]
    MalformedName { name: String, reason: &'static str },

    #[error("does not exist: {}", .path.display())]
    TargetMissing { path: PathBuf },

    #[error("not a regular file: {}", .path.display())]
    NotAFile { path: PathBuf },

    #[error("target file already exists: {}", .path.display())]
    RenameCollision { path: PathBuf },

    #[error("invalid tag {tag:?}: {reason}")]
    InvalidTag { tag: String, reason: &'static str },

    #[error("failed to parse tags file {}: {source}", .path.display())]
    RegistryParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("multiple files found with ID {id}:\n{}", .matches.join("\n"))]
    AmbiguousIdentifier { id: String, matches: Vec<String> },

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("{context} {}: {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(
        context: &'static str,
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        Error::Io { context, path: path.into(), source }
    }
}
