use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use directories::BaseDirs;

/// Layered settings: defaults, then `.tiasrc`, then environment, then CLI.
#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_from(&default_config_path())?;
        cfg.overlay_env(env::vars());
        Ok(cfg)
    }

    /// Defaults plus the given rc file, if it exists. Environment is not read.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut cfg = Self::with_defaults();
        cfg.config_path = path.to_path_buf();
        if path.exists() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            cfg.merge_rc(&text);
        }
        Ok(cfg)
    }

    pub fn with_defaults() -> Self {
        Self {
            inner: default_map(),
            config_path: default_config_path(),
        }
    }

    fn merge_rc(&mut self, text: &str) {
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((k, v)) = line.split_once('=') {
                self.inner.insert(k.trim().to_string(), v.trim().to_string());
            }
        }
    }

    /// Known keys are taken as is; `TIAS_FOO` sets `FOO`.
    pub fn overlay_env<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (k, v) in vars {
            if let Some(stripped) = k.strip_prefix("TIAS_") {
                if stripped != "LOG" {
                    self.inner.insert(stripped.to_string(), v);
                }
            } else if is_config_key(&k) {
                self.inner.insert(k, v);
            }
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.inner.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false)
    }

    pub fn get_u64(&self, key: &str) -> Result<Option<u64>> {
        match self.get(key) {
            None => Ok(None),
            Some(v) => match v.parse::<u64>() {
                Ok(n) => Ok(Some(n)),
                Err(_) => bail!("{key} must be a whole number, got `{v}`"),
            },
        }
    }

    pub fn request_timeout(&self) -> Result<Duration> {
        let secs = self.get_u64("REQUEST_TIMEOUT")?.unwrap_or(30);
        if secs == 0 {
            bail!("REQUEST_TIMEOUT must be at least 1 second");
        }
        Ok(Duration::from_secs(secs))
    }

    pub fn overrides_path(&self) -> PathBuf {
        self.get("OVERRIDES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| config_dir().join("overrides.json"))
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "API_BASE_URL",
        "REQUEST_TIMEOUT",
        "RUNTIME_VERSION",
        "OVERRIDES_PATH",
        "CONFIRM_JARGON",
        "DEFAULT_COLOR",
    ];
    KEYS.contains(&k)
}

fn config_dir() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("tias")
}

fn default_config_path() -> PathBuf {
    config_dir().join(".tiasrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert("API_BASE_URL".into(), "default".into());
    m.insert("REQUEST_TIMEOUT".into(), "30".into());
    m.insert("RUNTIME_VERSION".into(), "*".into());
    m.insert("CONFIRM_JARGON".into(), "true".into());
    m.insert("DEFAULT_COLOR".into(), "true".into());
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_present() {
        let cfg = Config::with_defaults();
        assert_eq!(cfg.get("API_BASE_URL").as_deref(), Some("default"));
        assert_eq!(cfg.request_timeout().unwrap(), Duration::from_secs(30));
        assert!(cfg.get_bool("CONFIRM_JARGON"));
        assert!(cfg.overrides_path().ends_with("overrides.json"));
    }

    #[test]
    fn rc_file_then_env_then_set() {
        let dir = tempfile::tempdir().unwrap();
        let rc = dir.path().join(".tiasrc");
        fs::write(&rc, "# comment\nREQUEST_TIMEOUT = 5\nCONFIRM_JARGON=false\n\nnot a pair\n").unwrap();

        let mut cfg = Config::load_from(&rc).unwrap();
        assert_eq!(cfg.request_timeout().unwrap(), Duration::from_secs(5));
        assert!(!cfg.get_bool("CONFIRM_JARGON"));

        cfg.overlay_env(vec![
            ("TIAS_REQUEST_TIMEOUT".to_string(), "7".to_string()),
            ("HOME".to_string(), "/nowhere".to_string()),
            ("API_BASE_URL".to_string(), "http://localhost:2000".to_string()),
        ]);
        assert_eq!(cfg.request_timeout().unwrap(), Duration::from_secs(7));
        assert_eq!(cfg.get("HOME"), None);
        assert_eq!(cfg.get("API_BASE_URL").as_deref(), Some("http://localhost:2000"));

        cfg.set("REQUEST_TIMEOUT", "9");
        assert_eq!(cfg.request_timeout().unwrap(), Duration::from_secs(9));
    }

    #[test]
    fn bad_numbers_are_errors() {
        let mut cfg = Config::with_defaults();
        cfg.set("REQUEST_TIMEOUT", "soon");
        assert!(cfg.request_timeout().is_err());
        cfg.set("REQUEST_TIMEOUT", "0");
        assert!(cfg.request_timeout().is_err());
    }
}
