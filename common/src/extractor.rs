//! パス全体からの識別子抽出

use crate::matchers::CATEGORY_MATCHERS;
use crate::normalizer::tokenize;
use crate::types::{Category, IdentifierMap};

/// `path` に含まれる識別子をすべて抽出
///
/// 各トークンを左から順に全カテゴリの照合関数に通す。1トークンが複数カテゴリに
/// 該当してもよい。値はカテゴリごとに初出順で重複排除。
/// どんな文字列でも受け付け、該当なしなら空のマップを返す
///
/// # Examples
/// ```
/// use fileserver_common::{extract_identifiers, Category};
///
/// let ids = extract_identifiers("L:/Fileserver/AU123/AU123_V2/TT95a.tif");
/// assert_eq!(ids.get(Category::Au).unwrap(), &["123".to_string()]);
/// assert_eq!(ids.get(Category::FieldNumber).unwrap(), &["123_V2".to_string()]);
/// assert_eq!(ids.get(Category::Tomb).unwrap(), &["10010".to_string()]);
/// ```
pub fn extract_identifiers(path: &str) -> IdentifierMap {
    let mut identifiers = IdentifierMap::new();

    for token in tokenize(path) {
        for (category, value) in match_token(&token) {
            identifiers.insert(category, value);
        }
    }

    identifiers
}

/// 1トークンの全カテゴリ該当（照合順）
pub fn match_token(token: &str) -> Vec<(Category, String)> {
    CATEGORY_MATCHERS
        .iter()
        .filter_map(|(category, matcher)| matcher(token).map(|value| (*category, value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(map: &IdentifierMap, category: Category) -> Vec<&str> {
        map.get(category)
            .map(|v| v.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_full_path() {
        let ids = extract_identifiers("L:/Fileserver/AU123/AU123_V2/TT95a.tif");
        assert_eq!(values(&ids, Category::Au), vec!["123"]);
        assert_eq!(values(&ids, Category::FieldNumber), vec!["123_V2"]);
        assert_eq!(values(&ids, Category::Tomb), vec!["10010"]);
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_tomb_in_file_name() {
        let ids = extract_identifiers("L:/Fileserver/Grab/K85_photo.jpg");
        assert_eq!(values(&ids, Category::Tomb), vec!["1"]);
    }

    #[test]
    fn test_planum_and_su() {
        let ids = extract_identifiers("L:/Fileserver/5PL3.2");
        assert_eq!(values(&ids, Category::Planum), vec!["5PL3.2"]);

        let ids = extract_identifiers("L:/Fileserver/PL10-4");
        assert_eq!(values(&ids, Category::Su), vec!["PL10-4"]);
    }

    #[test]
    fn test_unmatched_token() {
        assert!(extract_identifiers("readme").is_empty());
        assert!(extract_identifiers("").is_empty());
    }

    #[test]
    fn test_backslash_path() {
        let ids = extract_identifiers(r"L:\Fileserver\AU7\ZO3\W12b.jpg");
        assert_eq!(values(&ids, Category::Au), vec!["7"]);
        assert_eq!(values(&ids, Category::Zo), vec!["ZO3"]);
        assert_eq!(values(&ids, Category::Find), vec!["W12b"]);
    }

    #[test]
    fn test_insertion_order_and_dedup() {
        let ids = extract_identifiers("AU9/AU2/AU9/K85/TT95/k85.tif");
        assert_eq!(values(&ids, Category::Au), vec!["9", "2"]);
        assert_eq!(values(&ids, Category::Tomb), vec!["1", "10000"]);
    }

    #[test]
    fn test_token_fires_in_several_categories() {
        let hits = match_token("AU12_3");
        assert_eq!(
            hits,
            vec![
                (Category::Au, "12".to_string()),
                (Category::FieldNumber, "12_3".to_string()),
            ]
        );
    }

    #[test]
    fn test_idempotent() {
        let path = "L:/Fileserver/AU5/AU5PR2/C14b/ZKS3.1a/PL2-7 K453.tif";
        assert_eq!(extract_identifiers(path), extract_identifiers(path));
    }

    #[test]
    fn test_no_empty_categories() {
        let ids = extract_identifiers("L:/Fileserver/AU5/AU5PR2/C14b/ZKS3.1a/PL2-7 K453.tif");
        for (_, values) in ids.iter() {
            assert!(!values.is_empty());
        }
        assert_eq!(values(&ids, Category::Profile), vec!["5PR2"]);
        assert_eq!(values(&ids, Category::Find), vec!["C14b"]);
        assert_eq!(values(&ids, Category::Zo), vec!["ZKS3.1a"]);
        assert_eq!(values(&ids, Category::Su), vec!["PL2-7"]);
        assert_eq!(values(&ids, Category::Tomb), vec!["100"]);
    }
}
