//! Declared tag vocabulary, loaded from a TOML file of `[[tag]]` tables.

use crate::error::{Error, Result};
use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagDefinition {
    pub key: String,
    #[serde(default, rename = "desc")]
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    tag: Vec<TagDefinition>,
}

#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: Vec<TagDefinition>,
    index: HashMap<String, usize>,
}

impl TagRegistry {
    pub fn new(definitions: Vec<TagDefinition>) -> Self {
        let mut registry = Self::default();
        for def in definitions {
            if registry.index.contains_key(&def.key) {
                warn!("tag {:?} declared more than once; keeping the first", def.key);
                continue;
            }
            registry.index.insert(def.key.clone(), registry.tags.len());
            registry.tags.push(def);
        }
        registry
    }

    /// Load from `path`. A missing file is an empty registry; a file that is
    /// not valid TOML is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::io("failed to read tags file", path, e)),
        };
        let file: RegistryFile = toml::from_str(&raw).map_err(|source| {
            Error::RegistryParse { path: path.to_path_buf(), source }
        })?;
        let registry = Self::new(file.tag);
        debug!("loaded {} tag definitions from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Like [`TagRegistry::load`], but any failure degrades to an empty
    /// registry so callers can carry on without tag checking.
    pub fn load_or_empty(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("{e}; continuing without tag definitions");
            Self::default()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.key.as_str())
    }

    pub fn description(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&i| self.tags[i].description.as_str())
            .filter(|d| !d.is_empty())
    }

    /// Tags from `tags` that this registry does not declare, in order.
    pub fn undefined<'a>(&self, tags: &'a [String]) -> Vec<&'a str> {
        tags.iter()
            .map(String::as_str)
            .filter(|t| !self.contains(t))
            .collect()
    }
}
