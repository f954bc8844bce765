//! 更新処理
//!
//! 登録済み全ファイルのスキップ判定と存在確認をやり直し、識別子を再抽出する

use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::error::Result;
use fileserver_common::{extract_identifiers, normalize_path, IdentifierMap};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::io::ErrorKind;
use std::path::Path;
use std::time::{Duration, Instant};

/// アップロード対象外のフォルダ・拡張子
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkipRules {
    /// フォルダ接頭辞（スラッシュ正規化済み・末尾 `/`）
    pub folders: Vec<String>,
    /// 拡張子（小文字・ドットなし）
    pub extensions: Vec<String>,
}

impl SkipRules {
    pub fn new<F, E>(folders: F, extensions: E) -> Self
    where
        F: IntoIterator,
        F::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            folders: folders
                .into_iter()
                .map(|f| f.as_ref().trim().to_string())
                .filter(|f| !f.is_empty())
                .map(|f| folder_rule(&f))
                .collect(),
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// 保存先フォルダから規則ファイルを読み込む
    ///
    /// ファイルがなければ警告して空の規則として扱う。それ以外の読み込みエラーは返す
    pub fn load(config: &Config) -> Result<Self> {
        let folders = read_lines(&config.skipped_folders_file())?;
        let extensions = read_lines(&config.skipped_extensions_file())?;
        Ok(Self::new(folders, extensions))
    }

    /// `folder` がスキップ対象フォルダの中にあれば true
    pub fn skips_folder(&self, folder: &str) -> bool {
        let folder = format!("{}/", normalize_path(folder));
        self.folders.iter().any(|rule| folder.starts_with(rule.as_str()))
    }

    pub fn skips_extension(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e == extension)
    }
}

fn folder_rule(folder: &str) -> String {
    if folder.ends_with('/') || folder.ends_with('\\') {
        normalize_path(folder)
    } else {
        normalize_path(&format!("{}/", folder))
    }
}

/// 規則ファイルの各行
///
/// UTF-8として不正なバイトは置換文字にして読む
fn read_lines(path: &Path) -> Result<Vec<String>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            eprintln!("⚠ No rule file at {}. Please correct the path.", path.display());
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// 更新1回分の集計
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSummary {
    pub total: usize,
    pub skipped: usize,
    pub missing: usize,
    pub processed: usize,
    pub elapsed: Duration,
}

impl UpdateSummary {
    /// 残りのアップロード対象数
    pub fn uploadable(&self) -> usize {
        self.total.saturating_sub(self.skipped + self.missing)
    }
}

/// カタログ全体に更新処理を実行
///
/// `doublecheck` なしでは、スキップ済み・欠落済みのエントリは数えるだけ。
/// 同名のTIFFが登録済みのJPEGはそれ以上確認せずスキップ。
/// それ以外はスキップ判定と存在確認をやり直し、`db_entries` を再抽出結果で置き換える
pub fn update_entries(
    store: &mut CatalogStore,
    rules: &SkipRules,
    doublecheck: bool,
    verbose: bool,
) -> UpdateSummary {
    let started = Instant::now();
    let mut summary = UpdateSummary::default();
    let mut pending: Vec<String> = Vec::new();

    let paths: Vec<String> = store.paths().cloned().collect();
    let progress = ProgressBar::new(paths.len() as u64);

    for path in paths {
        summary.total += 1;
        progress.inc(1);

        let has_tiff_sibling = has_tiff_sibling(store, &path);
        let Some(entry) = store.get_mut(&path) else {
            continue;
        };

        if !doublecheck && entry.skip {
            summary.skipped += 1;
            continue;
        }
        if !doublecheck && !entry.still_there {
            summary.missing += 1;
            continue;
        }

        if (entry.extension == "jpg" || entry.extension == "jpeg") && has_tiff_sibling {
            entry.skip = true;
            summary.skipped += 1;
            continue;
        }

        entry.skip = rules.skips_folder(&entry.path)
            || rules.skips_extension(&entry.extension)
            || entry.name.starts_with('.');
        entry.still_there = Path::new(&path).is_file();

        if entry.skip {
            summary.skipped += 1;
            if verbose {
                progress.println(format!("{} - Skipped: {}", summary.total, path));
            }
        }
        if !entry.still_there {
            summary.missing += 1;
            if verbose {
                progress.println(format!("{} - Not there: {}", summary.total, path));
            }
        }
        if entry.processed {
            summary.processed += 1;
            if verbose {
                progress.println(format!("{} - Already processed: {}", summary.total, path));
            }
        }

        pending.push(path);
    }
    progress.finish_and_clear();

    let extracted: Vec<(String, IdentifierMap)> = pending
        .into_par_iter()
        .map(|path| {
            let identifiers = extract_identifiers(&path);
            (path, identifiers)
        })
        .collect();

    for (path, identifiers) in extracted {
        if let Some(entry) = store.get_mut(&path) {
            entry.bind_identifiers(identifiers);
        }
    }

    summary.elapsed = started.elapsed();
    summary
}

/// 拡張子を `.tif`/`.tiff` に替えたパスが登録済みか
fn has_tiff_sibling(store: &CatalogStore, path: &str) -> bool {
    let stem = match path.rfind('.') {
        Some(idx) => &path[..=idx],
        None => "",
    };
    store.contains(&format!("{}tif", stem)) || store.contains(&format!("{}tiff", stem))
}
