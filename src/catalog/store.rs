//! カタログストア: 正規化パス → エントリ
//!
//! 1つのJSONオブジェクトとして保存する。保存のたびに前回のファイルを
//! `archive/` の空いている最小番号へ移動する

use super::entry::CatalogEntry;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogStore {
    files: BTreeMap<String, CatalogEntry>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存済みカタログを読み込む。ファイルがなければ `None`
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let reader = BufReader::new(File::open(path)?);
        let store: CatalogStore = serde_json::from_reader(reader)?;
        Ok(Some(store))
    }

    /// カタログを `<storage_dir>/<name>.txt` に書き出す
    ///
    /// 既存ファイルは先に `archive/<name>_<n>.txt` へ移動し、そのパスを返す
    pub fn save(&self, storage_dir: &Path, name: &str) -> Result<Option<PathBuf>> {
        let archive_dir = storage_dir.join("archive");
        fs::create_dir_all(&archive_dir)?;

        let current = storage_dir.join(format!("{}.txt", name));
        let archived = if current.exists() {
            let target = next_archive_path(&archive_dir, name);
            fs::rename(&current, &target)?;
            Some(target)
        } else {
            None
        };

        let writer = BufWriter::new(File::create(&current)?);
        serde_json::to_writer(writer, self)?;
        Ok(archived)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&CatalogEntry> {
        self.files.get(path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut CatalogEntry> {
        self.files.get_mut(path)
    }

    pub fn insert(&mut self, path: String, entry: CatalogEntry) -> Option<CatalogEntry> {
        self.files.insert(path, entry)
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// パス順のエントリ
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CatalogEntry)> {
        self.files.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut CatalogEntry)> {
        self.files.iter_mut()
    }

    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.files.keys()
    }

    /// ファイルが消えたエントリを削除し、削除したパスを返す
    pub fn remove_lost(&mut self) -> Vec<String> {
        let lost: Vec<String> = self
            .files
            .iter()
            .filter(|(_, entry)| !entry.still_there)
            .map(|(path, _)| path.clone())
            .collect();

        for path in &lost {
            self.files.remove(path);
        }
        lost
    }
}

fn next_archive_path(archive_dir: &Path, name: &str) -> PathBuf {
    let mut n = 1;
    loop {
        let candidate = archive_dir.join(format!("{}_{}.txt", name, n));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
