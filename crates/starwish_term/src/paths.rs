//! Cross-platform config location

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Option<Self> {
        let base = dirs::config_dir()?;
        Some(Self {
            config_dir: base.join("starwish"),
        })
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }
}
