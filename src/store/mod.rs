//! User overrides (jargon and aliases) persisted as one JSON document.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::StoreError, jargon::JargonTemplate};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overrides {
    #[serde(default)]
    pub jargon: BTreeMap<String, JargonTemplate>,
    /// Identifiers whose bundled jargon the user deleted.
    #[serde(default)]
    pub disabled_jargon: BTreeSet<String>,
    /// Alias -> execution identifier.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct OverrideFile {
    path: PathBuf,
}

impl OverrideFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty set of overrides.
    pub fn load(&self) -> Result<Overrides, StoreError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no override file yet");
            return Ok(Overrides::default());
        }
        let text = fs::read_to_string(&self.path).map_err(|source| self.io(source))?;
        if text.trim().is_empty() {
            return Ok(Overrides::default());
        }
        serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: self.path.display().to_string(),
            source,
        })
    }

    pub fn save(&self, overrides: &Overrides) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.io(source))?;
        }
        let text = serde_json::to_string_pretty(overrides).map_err(|source| StoreError::Parse {
            path: self.path.display().to_string(),
            source,
        })?;
        fs::write(&self.path, text).map_err(|source| self.io(source))?;
        tracing::debug!(path = %self.path.display(), "saved overrides");
        Ok(())
    }

    fn io(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = OverrideFile::new(dir.path().join("none.json"));
        assert_eq!(file.load().unwrap(), Overrides::default());
    }

    #[test]
    fn save_creates_directories_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let file = OverrideFile::new(dir.path().join("nested/deeper/overrides.json"));
        let mut o = Overrides::default();
        o.aliases.insert("p".into(), "python".into());
        o.disabled_jargon.insert("java".into());
        o.jargon.insert(
            "lua".into(),
            JargonTemplate::new("lua", "print(INSERT_HERE)", None).unwrap(),
        );
        file.save(&o).unwrap();
        assert_eq!(file.load().unwrap(), o);
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.json");
        fs::write(&path, "{ not json").unwrap();
        let err = OverrideFile::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }
}
