use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub project: ProjectConfig,
    pub storage: StorageConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where the rule database lives. Tilde-expanded; relative paths are
    /// resolved against the project root.
    pub root: String,
    #[serde(default)]
    pub db_file: Option<String>,
}

impl Config {
    pub fn default_for_dir(project_id: &str) -> Self {
        Self {
            project: ProjectConfig { id: project_id.to_string() },
            storage: StorageConfig { root: ".rigcheck".to_string(), db_file: Some("rigcheck.db".to_string()) },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| "parse rigcheck.toml")?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn config_path(root: &Path) -> PathBuf {
        root.join(".rigcheck").join("rigcheck.toml")
    }

    pub fn db_path(&self, root: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&self.storage.root).to_string();
        let storage_root = if Path::new(&expanded).is_absolute() {
            PathBuf::from(expanded)
        } else {
            root.join(expanded)
        };
        storage_root.join(self.storage.db_file.as_deref().unwrap_or("rigcheck.db"))
    }
}
