//! 墓番号対照表: 旧墓コード → 正式な墓ID

const TOMB_CONCORDANCE: &[(&str, &str)] = &[
    ("k85", "1"),
    ("k453", "100"),
    ("k90", "500"),
    ("k555", "2000"),
    ("tt84", "6500"),
    ("tt95", "10000"),
    ("95a", "10010"),
    ("tt95a", "10010"),
    ("95b", "10003"),
    ("tt95b", "10003"),
    ("95c", "10004"),
    ("tt95c", "10004"),
];

/// 旧墓コードを検索（大文字小文字を区別しない）
pub fn lookup(code: &str) -> Option<&'static str> {
    let code = code.to_lowercase();
    TOMB_CONCORDANCE
        .iter()
        .find(|(legacy, _)| *legacy == code)
        .map(|(_, canonical)| *canonical)
}

/// 照合した墓コードの正式表記
///
/// 対照表にあれば正式IDに変換、なければそのまま。結果は常に大文字
pub fn canonical_tomb(code: &str) -> String {
    let lowered = code.to_lowercase();
    match lookup(&lowered) {
        Some(canonical) => canonical.to_uppercase(),
        None => lowered.to_uppercase(),
    }
}
