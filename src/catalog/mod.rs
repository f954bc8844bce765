//! ファイルカタログ: エントリ・保存・読み込み

pub mod entry;
pub mod store;

pub use entry::{extension_of, CatalogEntry};
pub use store::CatalogStore;

use crate::config::Config;
use crate::error::Result;
use crate::scanner;

/// 保存済みカタログを読み込む。なければファイルサーバーを走査して新規作成・保存
pub fn open_catalog(config: &Config, verbose: bool) -> Result<CatalogStore> {
    let catalog_file = config.catalog_file();

    if let Some(store) = CatalogStore::load(&catalog_file)? {
        if verbose {
            println!("  catalog loaded: {} ({} files)", catalog_file.display(), store.len());
        }
        return Ok(store);
    }

    println!("No catalog found at {}. A new one will be created.", catalog_file.display());
    let mut store = CatalogStore::new();
    scanner::register_files(&mut store, &config.fileserver_root, false, verbose)?;
    store.save(&config.storage_dir, &config.catalog_name)?;
    Ok(store)
}
