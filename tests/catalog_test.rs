//! カタログ保存のテスト
//!
//! 保存・読み込みと、以前のカタログの番号付きアーカイブ

use fileserver_catalog::catalog::{open_catalog, CatalogEntry, CatalogStore};
use fileserver_catalog::config::Config;
use fileserver_common::{extract_identifiers, Category};
use tempfile::tempdir;

fn sample_store() -> CatalogStore {
    let mut store = CatalogStore::new();
    let path = "L:/Fileserver/AU123/AU123_V2/TT95a.tif";
    let mut entry = CatalogEntry::new("L:/Fileserver/AU123/AU123_V2", "TT95a.tif");
    entry.bind_identifiers(extract_identifiers(path));
    entry.add_package("photogrammetry");
    store.insert(path.to_string(), entry);
    store
}

/// カタログファイルがなくてもエラーにしない
#[test]
fn test_load_missing_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let loaded = CatalogStore::load(&dir.path().join("fileserver_json.txt")).unwrap();
    assert!(loaded.is_none());
}

/// 保存・読み込みでエントリ・識別子・パッケージを保持
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = sample_store();

    let archived = store.save(dir.path(), "fileserver_json").expect("save failed");
    assert!(archived.is_none());
    assert!(dir.path().join("archive").is_dir());

    let loaded = CatalogStore::load(&dir.path().join("fileserver_json.txt"))
        .unwrap()
        .expect("catalog missing");
    assert_eq!(loaded, store);

    let entry = loaded.get("L:/Fileserver/AU123/AU123_V2/TT95a.tif").unwrap();
    let ids = entry.db_entries.as_ref().unwrap();
    assert!(ids.contains(Category::Tomb, "10010"));
    assert!(entry.in_package("photogrammetry"));
}

/// 保存のたびに前回のカタログを次の空き番号へ移動
#[test]
fn test_numbered_backups() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = sample_store();

    store.save(dir.path(), "fileserver_json").unwrap();
    let first = store.save(dir.path(), "fileserver_json").unwrap();
    let second = store.save(dir.path(), "fileserver_json").unwrap();

    assert_eq!(first, Some(dir.path().join("archive").join("fileserver_json_1.txt")));
    assert_eq!(second, Some(dir.path().join("archive").join("fileserver_json_2.txt")));
    assert!(dir.path().join("fileserver_json.txt").is_file());
}

/// アーカイブ番号の欠番から埋める
#[test]
fn test_backup_fills_lowest_free_number() {
    let dir = tempdir().expect("Failed to create temp dir");
    let archive = dir.path().join("archive");
    std::fs::create_dir_all(&archive).unwrap();
    std::fs::write(archive.join("fileserver_json_2.txt"), "{}").unwrap();

    let store = sample_store();
    store.save(dir.path(), "fileserver_json").unwrap();
    let archived = store.save(dir.path(), "fileserver_json").unwrap();
    assert_eq!(archived, Some(archive.join("fileserver_json_1.txt")));
}

/// カタログJSONのフィールド名
#[test]
fn test_catalog_json_layout() {
    let dir = tempdir().expect("Failed to create temp dir");
    sample_store().save(dir.path(), "fileserver_json").unwrap();

    let content = std::fs::read_to_string(dir.path().join("fileserver_json.txt")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    let entry = &json["L:/Fileserver/AU123/AU123_V2/TT95a.tif"];

    assert_eq!(entry["extension"], "tif");
    assert_eq!(entry["skip"], false);
    assert_eq!(entry["name"], "TT95a.tif");
    assert_eq!(entry["db_entries"]["AU"], serde_json::json!(["123"]));
    assert_eq!(entry["db_entries"]["FieldNumber"], serde_json::json!(["123_V2"]));
    assert_eq!(entry["db_entries"]["Tomb"], serde_json::json!(["10010"]));
    assert_eq!(entry["packages"], serde_json::json!(["photogrammetry"]));
}

/// 保存済みカタログがなければ登録して保存
#[test]
fn test_open_catalog_registers_when_missing() {
    let share = tempdir().expect("Failed to create temp dir");
    let storage = tempdir().expect("Failed to create temp dir");
    std::fs::write(share.path().join("K85.jpg"), b"dummy").unwrap();

    let config = Config {
        fileserver_root: share.path().to_path_buf(),
        storage_dir: storage.path().to_path_buf(),
        ..Default::default()
    };

    let store = open_catalog(&config, false).expect("open failed");
    assert_eq!(store.len(), 1);
    assert!(config.catalog_file().is_file());

    // 2回目は保存済みファイルを読む
    let reopened = open_catalog(&config, false).expect("reopen failed");
    assert_eq!(reopened, store);
}

/// 壊れたカタログJSONはエラー（黙って作り直さない）
#[test]
fn test_load_corrupted_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("fileserver_json.txt");
    std::fs::write(&path, "{ invalid json }").unwrap();

    assert!(CatalogStore::load(&path).is_err());
}
