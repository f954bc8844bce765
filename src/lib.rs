//! Fileserver catalog
//!
//! 発掘ファイルサーバーのファイルを登録し、アップロード対象外を判定し、
//! パス中の識別子を通じて各ファイルをデータベースの記録に関連付ける

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod packages;
pub mod report;
pub mod scanner;
pub mod update;
