use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_PAGE_URL: &str = "https://apod.nasa.gov/apod/astropix.html";
pub const DEFAULT_INTERPRETER: &str = "/usr/bin/osascript";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApodConfig {
    /// Page that embeds today's picture; image paths are resolved against it
    pub page_url: String,
    pub probe_attempts: u32,
    pub probe_delay_secs: u64,
    /// Where the picture is saved; the system temp directory when unset
    pub download_dir: Option<PathBuf>,
    pub interpreter: PathBuf,
    pub timeout_secs: u64,
}

impl Default for ApodConfig {
    fn default() -> Self {
        Self {
            page_url: DEFAULT_PAGE_URL.to_string(),
            probe_attempts: 12,
            probe_delay_secs: 5,
            download_dir: None,
            interpreter: PathBuf::from(DEFAULT_INTERPRETER),
            timeout_secs: 30,
        }
    }
}

impl ApodConfig {
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Unable to determine user config directory")?;
        Ok(config_dir.join("apod").join("config.toml"))
    }

    /// Resolve `--config` or fall back to the per-user location.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let s = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&s).with_context(|| format!("parsing config toml {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("creating config directory")?;
        }

        let toml = toml::to_string_pretty(self).context("serializing config to toml")?;
        fs::write(path, toml).context("writing config file")?;
        Ok(())
    }

    pub fn probe_delay(&self) -> Duration {
        Duration::from_secs(self.probe_delay_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ApodConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ApodConfig::default());
        assert_eq!(config.probe_attempts, 12);
        assert_eq!(config.probe_delay(), Duration::from_secs(5));
        assert_eq!(config.download_dir(), std::env::temp_dir());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "probe_attempts = 3\ndownload_dir = \"/var/tmp/apod\"\n").unwrap();

        let config = ApodConfig::load(&path).unwrap();
        assert_eq!(config.probe_attempts, 3);
        assert_eq!(config.download_dir(), PathBuf::from("/var/tmp/apod"));
        assert_eq!(config.page_url, DEFAULT_PAGE_URL);
        assert_eq!(config.interpreter, PathBuf::from(DEFAULT_INTERPRETER));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "probe_attempts = \"many\"").unwrap();

        let err = ApodConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config toml"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = ApodConfig {
            probe_delay_secs: 1,
            interpreter: PathBuf::from("/opt/bin/osascript"),
            ..ApodConfig::default()
        };
        config.save(&path).unwrap();

        assert_eq!(ApodConfig::load(&path).unwrap(), config);
    }
}
