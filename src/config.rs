use std::env;
use std::path::{Path, PathBuf};

/// File name of the tag registry looked up next to the files it describes.
pub const REGISTRY_FILE: &str = "tag.toml";

/// Resolve the tag registry for files in `dir`: an explicit path wins, then
/// `PARAKEET_TAGS_FILE`, then `tag.toml` inside `dir`.
pub fn registry_path(dir: &Path, explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = env::var("PARAKEET_TAGS_FILE") {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    dir.join(REGISTRY_FILE)
}

pub fn color_enabled() -> bool {
    env::var("NO_COLOR").is_err()
}

/// Route `log` output through env_logger; `RUST_LOG` overrides the default
/// `warn` level.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .format_timestamp(None)
    .format_module_path(false)
    .try_init();
}
