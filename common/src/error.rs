//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// 抽出エンジン自体は失敗しない。ユーザー入力のカテゴリ名解析のみ。
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
