use crate::catalog::{CatalogEntry, CatalogStore};
use crate::error::{CatalogError, Result};
use fileserver_common::normalize_path;
use indicatif::ProgressBar;
use std::path::Path;
use walkdir::WalkDir;

/// 登録走査の結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterSummary {
    /// 共有上で見つけたファイル数
    pub scanned: usize,
    /// カタログに追加したエントリ数
    pub added: usize,
}

/// `root` を走査して全ファイルを登録
///
/// `only_new` なしではカタログを作り直す。`only_new` ありでは既存エントリ
/// （フラグ・パッケージ・識別子）を残し、未登録のパスだけ追加する
pub fn register_files(
    store: &mut CatalogStore,
    root: &Path,
    only_new: bool,
    verbose: bool,
) -> Result<RegisterSummary> {
    if !root.exists() {
        return Err(CatalogError::FolderNotFound(root.display().to_string()));
    }

    if !only_new {
        store.clear();
    }

    let progress = ProgressBar::new_spinner();
    let mut summary = RegisterSummary::default();

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        summary.scanned += 1;
        if summary.scanned % 1000 == 0 {
            progress.set_message(format!("{} files scanned", summary.scanned));
            progress.tick();
        }

        let file_path = normalize_path(&entry.path().to_string_lossy());
        if store.contains(&file_path) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let folder = entry
            .path()
            .parent()
            .map(|p| normalize_path(&p.to_string_lossy()))
            .unwrap_or_default();

        if verbose {
            progress.println(format!("  + {}", file_path));
        }

        store.insert(file_path, CatalogEntry::new(&folder, &name));
        summary.added += 1;
    }

    progress.finish_and_clear();
    Ok(summary)
}
