//! パッケージ割当
//!
//! 名前からは識別できないが一緒に扱うファイル（フォトグラメトリの連番、
//! 日誌写真など）をまとめる。フォルダ単位で割り当てる

use crate::catalog::CatalogStore;
use fileserver_common::normalize_path;

/// `folder` 内の全ファイルに `package` を割り当てる
///
/// `recursive` ならサブフォルダも含む。新たに割り当てたファイル数を返す
pub fn add_folder_to_package(
    store: &mut CatalogStore,
    folder: &str,
    package: &str,
    recursive: bool,
) -> usize {
    let folder = normalize_path(folder);
    let mut tagged = 0;

    for (_, entry) in store.iter_mut() {
        let in_folder = if recursive {
            entry.path.starts_with(&folder)
        } else {
            entry.path == folder
        };

        if in_folder && entry.add_package(package) {
            tagged += 1;
        }
    }

    tagged
}

/// `package` に属するファイル。欠落ファイルは常に除外
pub fn files_by_package(store: &CatalogStore, package: &str, include_skipped: bool) -> Vec<String> {
    store
        .iter()
        .filter(|(_, entry)| include_skipped || !entry.skip)
        .filter(|(_, entry)| entry.still_there)
        .filter(|(_, entry)| entry.in_package(package))
        .map(|(path, _)| path.clone())
        .collect()
}

/// 全パッケージ名（初出順）
pub fn list_packages(store: &CatalogStore) -> Vec<String> {
    let mut packages: Vec<String> = Vec::new();
    for (_, entry) in store.iter() {
        for package in entry.packages.iter().flatten() {
            if !packages.contains(package) {
                packages.push(package.clone());
            }
        }
    }
    packages
}
