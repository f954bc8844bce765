//! レポート系コマンドのカタログ問い合わせ

use crate::catalog::{CatalogEntry, CatalogStore};
use crate::error::{CatalogError, Result};
use fileserver_common::Category;
use std::collections::BTreeMap;

/// カタログ全体の拡張子集計
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtensionCounts {
    pub all: BTreeMap<String, usize>,
    /// スキップでも欠落でもない
    pub used: BTreeMap<String, usize>,
    /// スキップまたは欠落
    pub skipped: BTreeMap<String, usize>,
}

pub fn extension_counts(store: &CatalogStore) -> Result<ExtensionCounts> {
    if store.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }

    let mut counts = ExtensionCounts::default();
    for (_, entry) in store.iter() {
        let extension = entry.extension.to_lowercase();
        *counts.all.entry(extension.clone()).or_insert(0) += 1;

        let bucket = if entry.is_uploadable() {
            &mut counts.used
        } else {
            &mut counts.skipped
        };
        *bucket.entry(extension).or_insert(0) += 1;
    }
    Ok(counts)
}

fn visible<'a>(
    store: &'a CatalogStore,
    include_skipped: bool,
) -> impl Iterator<Item = (&'a String, &'a CatalogEntry)> {
    store
        .iter()
        .filter(move |(_, entry)| include_skipped || entry.is_uploadable())
}

pub fn files_by_extension(store: &CatalogStore, extension: &str, include_skipped: bool) -> Vec<String> {
    let extension = extension.to_lowercase();
    visible(store, include_skipped)
        .filter(|(_, entry)| entry.extension == extension)
        .map(|(path, _)| path.clone())
        .collect()
}

pub fn files_without_db_connection(store: &CatalogStore, include_skipped: bool) -> Vec<String> {
    visible(store, include_skipped)
        .filter(|(_, entry)| !entry.has_db_connection())
        .map(|(path, _)| path.clone())
        .collect()
}

fn is_unassigned(entry: &CatalogEntry) -> bool {
    !entry.has_db_connection() && !entry.has_packages()
}

/// 識別子もパッケージもないファイル（ソート済み）
pub fn unassigned_files(store: &CatalogStore, include_skipped: bool) -> Vec<String> {
    let mut files: Vec<String> = visible(store, include_skipped)
        .filter(|(_, entry)| is_unassigned(entry))
        .map(|(path, _)| path.clone())
        .collect();
    files.sort();
    files
}

/// 未割当ファイルを含むフォルダ（ソート済み・重複なし）
pub fn unassigned_folders(store: &CatalogStore, include_skipped: bool) -> Vec<String> {
    let mut folders: Vec<String> = visible(store, include_skipped)
        .filter(|(_, entry)| is_unassigned(entry))
        .map(|(_, entry)| entry.path.clone())
        .collect();
    folders.sort();
    folders.dedup();
    folders
}

/// 抽出した識別子の `category` に `value` を含むファイル
pub fn files_with_identifier(store: &CatalogStore, category: Category, value: &str) -> Vec<String> {
    store
        .iter()
        .filter(|(_, entry)| {
            entry
                .db_entries
                .as_ref()
                .is_some_and(|ids| ids.contains(category, value))
        })
        .map(|(path, _)| path.clone())
        .collect()
}

/// カテゴリ名（大文字小文字無視）で指定する `files_with_identifier`
pub fn related_files(store: &CatalogStore, category: &str, value: &str) -> Result<Vec<String>> {
    let category: Category = category.parse()?;
    Ok(files_with_identifier(store, category, value))
}

/// フラグ集計
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogNumbers {
    pub total: usize,
    pub skipped: usize,
    pub lost: usize,
    pub processed: usize,
}

impl CatalogNumbers {
    pub fn unskipped(&self) -> usize {
        self.total - self.skipped
    }

    pub fn still_there(&self) -> usize {
        self.total - self.lost
    }

    pub fn unprocessed(&self) -> usize {
        self.total
            .saturating_sub(self.processed + self.skipped + self.lost)
    }
}

pub fn numbers(store: &CatalogStore) -> CatalogNumbers {
    let mut numbers = CatalogNumbers::default();
    for (_, entry) in store.iter() {
        numbers.total += 1;
        if entry.skip {
            numbers.skipped += 1;
        }
        if !entry.still_there {
            numbers.lost += 1;
        }
        if entry.processed {
            numbers.processed += 1;
        }
    }
    numbers
}

#[cfg(test)]
mod tests {
    use super::*;
    use fileserver_common::extract_identifiers;

    fn add(store: &mut CatalogStore, folder: &str, name: &str) -> String {
        let path = format!("{}/{}", folder, name);
        store.insert(path.clone(), CatalogEntry::new(folder, name));
        path
    }

    #[test]
    fn test_extension_counts_empty() {
        let store = CatalogStore::new();
        assert!(matches!(extension_counts(&store), Err(CatalogError::EmptyCatalog)));
    }

    #[test]
    fn test_extension_counts() {
        let mut store = CatalogStore::new();
        add(&mut store, "L:/FS", "a.tif");
        add(&mut store, "L:/FS", "b.TIF");
        let skipped = add(&mut store, "L:/FS", "c.tif");
        store.get_mut(&skipped).unwrap().skip = true;
        add(&mut store, "L:/FS", "d.jpg");

        let counts = extension_counts(&store).unwrap();
        assert_eq!(counts.all["tif"], 3);
        assert_eq!(counts.used["tif"], 2);
        assert_eq!(counts.skipped["tif"], 1);
        assert_eq!(counts.used["jpg"], 1);
    }

    #[test]
    fn test_unassigned() {
        let mut store = CatalogStore::new();
        let tomb = add(&mut store, "L:/FS/B", "K85.jpg");
        store
            .get_mut(&tomb)
            .unwrap()
            .bind_identifiers(extract_identifiers(&tomb));
        let tagged = add(&mut store, "L:/FS/A", "diary.jpg");
        store.get_mut(&tagged).unwrap().add_package("diary");
        add(&mut store, "L:/FS/C", "z.jpg");
        add(&mut store, "L:/FS/C", "y.jpg");
        add(&mut store, "L:/FS/A", "x.jpg");

        assert_eq!(
            unassigned_files(&store, false),
            vec!["L:/FS/A/x.jpg", "L:/FS/C/y.jpg", "L:/FS/C/z.jpg"]
        );
        assert_eq!(unassigned_folders(&store, false), vec!["L:/FS/A", "L:/FS/C"]);
        assert_eq!(files_without_db_connection(&store, false).len(), 4);
        assert_eq!(
            files_with_identifier(&store, Category::Tomb, "1"),
            vec!["L:/FS/B/K85.jpg"]
        );
    }

    #[test]
    fn test_related_files() {
        let mut store = CatalogStore::new();
        let tomb = add(&mut store, "L:/FS/AU3", "TT95a.tif");
        store
            .get_mut(&tomb)
            .unwrap()
            .bind_identifiers(extract_identifiers(&tomb));

        assert_eq!(related_files(&store, "tomb", "10010").unwrap(), vec![tomb.clone()]);
        assert_eq!(related_files(&store, "au", "3").unwrap(), vec![tomb]);
        assert!(related_files(&store, "Tomb", "1").unwrap().is_empty());
    }

    #[test]
    fn test_related_files_unknown_category() {
        let store = CatalogStore::new();
        let err = related_files(&store, "Trench", "1").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Common(fileserver_common::Error::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_missing_files_hidden_unless_requested() {
        let mut store = CatalogStore::new();
        let gone = add(&mut store, "L:/FS", "a.tif");
        store.get_mut(&gone).unwrap().still_there = false;

        assert!(files_by_extension(&store, "TIF", false).is_empty());
        assert_eq!(files_by_extension(&store, "tif", true), vec!["L:/FS/a.tif"]);
    }

    #[test]
    fn test_numbers() {
        let mut store = CatalogStore::new();
        let a = add(&mut store, "L:/FS", "a.tif");
        let b = add(&mut store, "L:/FS", "b.tif");
        add(&mut store, "L:/FS", "c.tif");
        add(&mut store, "L:/FS", "d.tif");
        store.get_mut(&a).unwrap().skip = true;
        store.get_mut(&b).unwrap().processed = true;

        let numbers = numbers(&store);
        assert_eq!(numbers.total, 4);
        assert_eq!(numbers.skipped, 1);
        assert_eq!(numbers.processed, 1);
        assert_eq!(numbers.lost, 0);
        assert_eq!(numbers.unskipped(), 3);
        assert_eq!(numbers.unprocessed(), 2);
    }
}
