//! 抽出エンジンとカタログで共有する識別子の型
//!
//! - Category: パスに現れる識別子の種類（固定）
//! - IdentifierMap: カテゴリ → 重複なしの値（走査順）

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 識別子カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// 区域コード
    #[serde(rename = "AU")]
    Au,
    FieldNumber,
    /// 出土品
    Find,
    /// 掘削面（プラヌム）
    Planum,
    /// 断面図
    Profile,
    /// 層位単位
    #[serde(rename = "SU")]
    Su,
    #[serde(rename = "ZO")]
    Zo,
    Tomb,
}

impl Category {
    /// 全カテゴリ（照合順）
    pub const ALL: [Category; 8] = [
        Category::Au,
        Category::FieldNumber,
        Category::Find,
        Category::Planum,
        Category::Profile,
        Category::Su,
        Category::Zo,
        Category::Tomb,
    ];

    /// カタログJSONのキー
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Au => "AU",
            Category::FieldNumber => "FieldNumber",
            Category::Find => "Find",
            Category::Planum => "Planum",
            Category::Profile => "Profile",
            Category::Su => "SU",
            Category::Zo => "ZO",
            Category::Tomb => "Tomb",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

/// 1パスから抽出した識別子
///
/// カテゴリ内の値は初出順で重複なし。値のないカテゴリは持たない
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Category, Vec<String>>",
    into = "BTreeMap<Category, Vec<String>>"
)]
pub struct IdentifierMap {
    entries: BTreeMap<Category, Vec<String>>,
}

impl IdentifierMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// `category` に値を追加
    ///
    /// 既に同じ値があれば `false` を返す
    pub fn insert(&mut self, category: Category, value: impl Into<String>) -> bool {
        let value = value.into();
        let values = self.entries.entry(category).or_default();
        if values.contains(&value) {
            return false;
        }
        values.push(value);
        true
    }

    pub fn get(&self, category: Category) -> Option<&[String]> {
        self.entries.get(&category).map(Vec::as_slice)
    }

    pub fn contains(&self, category: Category, value: &str) -> bool {
        self.get(category)
            .map(|values| values.iter().any(|v| v == value))
            .unwrap_or(false)
    }

    /// 値を持つカテゴリ数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.entries.iter().map(|(c, v)| (*c, v.as_slice()))
    }
}

impl From<BTreeMap<Category, Vec<String>>> for IdentifierMap {
    fn from(raw: BTreeMap<Category, Vec<String>>) -> Self {
        let mut map = IdentifierMap::new();
        for (category, values) in raw {
            for value in values {
                map.insert(category, value);
            }
        }
        map
    }
}

impl From<IdentifierMap> for BTreeMap<Category, Vec<String>> {
    fn from(map: IdentifierMap) -> Self {
        map.entries
    }
}

impl std::fmt::Display for IdentifierMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(category, values)| format!("{}: [{}]", category, values.join(", ")))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
