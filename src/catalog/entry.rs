use fileserver_common::IdentifierMap;
use serde::{Deserialize, Serialize};

/// 登録ファイル1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// 拡張子（小文字）
    pub extension: String,
    /// 共有から消えたら false
    pub still_there: bool,
    /// アップロード済み
    pub processed: bool,
    /// アップロード対象外
    pub skip: bool,
    /// 親フォルダ
    pub path: String,
    /// ファイル名
    pub name: String,

    /// フルパスから抽出した識別子（更新のたびに置き換え）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_entries: Option<IdentifierMap>,

    /// 手動で割り当てたパッケージ（小文字・重複なし）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<String>>,
}

impl CatalogEntry {
    pub fn new(folder: &str, name: &str) -> Self {
        Self {
            extension: extension_of(name),
            still_there: true,
            processed: false,
            skip: false,
            path: folder.to_string(),
            name: name.to_string(),
            db_entries: None,
            packages: None,
        }
    }

    /// 新しい抽出結果を保存（以前の値は破棄）
    pub fn bind_identifiers(&mut self, identifiers: IdentifierMap) {
        self.db_entries = Some(identifiers);
    }

    pub fn has_db_connection(&self) -> bool {
        self.db_entries.as_ref().is_some_and(|ids| !ids.is_empty())
    }

    pub fn has_packages(&self) -> bool {
        self.packages.is_some()
    }

    /// スキップでも欠落でもない
    pub fn is_uploadable(&self) -> bool {
        !self.skip && self.still_there
    }

    /// `package` を小文字で追加。割当済みなら false
    pub fn add_package(&mut self, package: &str) -> bool {
        let package = package.to_lowercase();
        let packages = self.packages.get_or_insert_with(Vec::new);
        if packages.contains(&package) {
            return false;
        }
        packages.push(package);
        true
    }

    pub fn in_package(&self, package: &str) -> bool {
        let package = package.to_lowercase();
        self.packages
            .as_ref()
            .is_some_and(|packages| packages.contains(&package))
    }
}

/// 最後のドット以降を小文字で返す。ドットがなければ名前全体が拡張子
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) => name[idx + 1..].to_lowercase(),
        None => name.to_lowercase(),
    }
}
