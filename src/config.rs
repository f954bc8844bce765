use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_ROOT: &str = "L:/Fileserver/";
const DEFAULT_STORAGE: &str = "./storage/";
const DEFAULT_CATALOG_NAME: &str = "fileserver_json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// カタログ対象の共有ルート
    pub fileserver_root: PathBuf,
    /// カタログ・アーカイブ・スキップ規則ファイルの保存先
    pub storage_dir: PathBuf,
    /// カタログJSONのファイル名（拡張子なし）
    pub catalog_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fileserver_root: PathBuf::from(DEFAULT_ROOT),
            storage_dir: PathBuf::from(DEFAULT_STORAGE),
            catalog_name: DEFAULT_CATALOG_NAME.into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str::<Config>(&content)?
        } else {
            Self::default()
        };

        // 環境変数を設定ファイルより優先
        if let Ok(root) = std::env::var("FILESERVER_ROOT") {
            config.fileserver_root = PathBuf::from(root);
        }
        if let Ok(storage) = std::env::var("FILESERVER_STORAGE") {
            config.storage_dir = PathBuf::from(storage);
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CatalogError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("fileserver-catalog").join("config.json"))
    }

    pub fn set_root(&mut self, root: PathBuf) -> Result<()> {
        self.fileserver_root = root;
        self.save()
    }

    pub fn set_storage(&mut self, storage: PathBuf) -> Result<()> {
        self.storage_dir = storage;
        self.save()
    }

    /// `<storage>/<catalog_name>.txt`
    pub fn catalog_file(&self) -> PathBuf {
        self.storage_dir.join(format!("{}.txt", self.catalog_name))
    }

    pub fn skipped_folders_file(&self) -> PathBuf {
        self.storage_dir.join("skipped_folders.txt")
    }

    pub fn skipped_extensions_file(&self) -> PathBuf {
        self.storage_dir.join("skipped_extensions.txt")
    }
}
