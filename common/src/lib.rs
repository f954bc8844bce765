//! Fileserver Common Library
//!
//! ファイルパスから発掘記録の識別子（区域・出土品・プラヌム・断面・層位・墓）を抽出する。
//! 純粋関数のみ。I/Oはカタログ側クレートが担当

pub mod concordance;
pub mod error;
pub mod extractor;
pub mod matchers;
pub mod normalizer;
pub mod types;

pub use error::{Error, Result};
pub use extractor::{extract_identifiers, match_token};
pub use normalizer::{normalize_path, tokenize};
pub use types::{Category, IdentifierMap};
