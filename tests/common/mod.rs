use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory holding the config file and downloads of one test.
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("apod").join("config.toml")
    }

    pub fn download_dir(&self) -> PathBuf {
        self.path().join("downloads")
    }

    /// Write a config that points the tool at `page_url` and never waits between probes.
    pub fn write_config(&self, page_url: &str, attempts: u32) -> Result<()> {
        let path = self.config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(
            &path,
            format!(
                "page_url = \"{page_url}\"\nprobe_attempts = {attempts}\nprobe_delay_secs = 0\ndownload_dir = \"{}\"\ntimeout_secs = 5\n",
                self.download_dir().display()
            ),
        )?;
        Ok(())
    }
}
