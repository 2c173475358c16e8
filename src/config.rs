//! Engine configuration, loaded from a TOML file with full defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cache::CacheConfig;
use crate::compose::{Layout, TRANSITION};
use crate::icon::IconMode;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ordered collector names per row, top row first.
    pub rows: Vec<Vec<String>>,
    /// Palette file; the built-in palette when absent.
    pub theme: Option<PathBuf>,
    /// Cache directory; resolved under the user cache dir when absent.
    pub cache_dir: Option<PathBuf>,
    /// Fallback TTL for callers that do not declare their own.
    pub cache_ttl_secs: u64,
    pub spacing: bool,
    pub transparent: bool,
    pub pill: bool,
    pub separator: char,
    pub mode: IconMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: vec![
                ["hostname", "workdir", "load", "battery", "clock"]
                    .map(str::to_owned)
                    .to_vec(),
            ],
            theme: None,
            cache_dir: None,
            cache_ttl_secs: 30,
            spacing: false,
            transparent: false,
            pill: false,
            separator: TRANSITION,
            mode: IconMode::Icons,
        }
    }
}

impl Config {
    /// Missing file means defaults; a present but unparsable file is an
    /// error the user should see.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    /// The cache store's explicit configuration. The directory default is
    /// resolved once, here, not ambiently at call sites.
    pub fn cache_config(&self) -> CacheConfig {
        let dir = self.cache_dir.clone().unwrap_or_else(|| {
            env::var_os("XDG_CACHE_HOME")
                .map(PathBuf::from)
                .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))
                .unwrap_or_else(env::temp_dir)
                .join("paneline")
        });
        CacheConfig {
            dir,
            default_ttl: Duration::from_secs(self.cache_ttl_secs),
        }
    }

    pub fn layout(&self) -> Layout {
        Layout {
            spacing: self.spacing,
            transparent: self.transparent,
            pill: self.pill,
            separator: self.separator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.rows.len(), 1);
        assert!(!config.spacing);
        assert_eq!(config.mode, IconMode::Icons);
    }

    #[test]
    fn partial_file_merges_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "spacing = true\nmode = \"text\"\nrows = [[\"clock\"], [\"workdir\"]]\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.spacing);
        assert_eq!(config.mode, IconMode::Text);
        assert_eq!(config.rows, vec![vec!["clock".to_owned()], vec!["workdir".to_owned()]]);
        // Untouched keys keep their defaults.
        assert_eq!(config.cache_ttl_secs, 30);
    }

    #[test]
    fn unparsable_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "rows = \"not a list\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn explicit_cache_dir_wins() {
        let config = Config {
            cache_dir: Some(PathBuf::from("/tmp/somewhere")),
            cache_ttl_secs: 7,
            ..Config::default()
        };
        let cache = config.cache_config();
        assert_eq!(cache.dir, PathBuf::from("/tmp/somewhere"));
        assert_eq!(cache.default_ttl, Duration::from_secs(7));
    }
}
