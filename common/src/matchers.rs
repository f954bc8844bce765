//! カテゴリ別トークン照合
//!
//! 各照合関数は1トークンを受け取り、値を最大1つ返す。
//! パターンはトークン先頭に固定・大文字小文字無視。
//! 例外はFN出土品パターンで、判定は他と同じ先頭固定だが、
//! 返す値はトークン全体を大文字小文字区別で走査した結果になる。
//!
//! Find と ZO は複数のサブパターンを持つ。固定順に試し、
//! 最初に判定が一致したものがそのカテゴリの結果を決める。

use crate::concordance;
use crate::types::Category;
use regex::Regex;

/// 照合関数の共通シグネチャ
pub type MatchFn = fn(&str) -> Option<String>;

/// 全トークンに適用する照合関数一覧（実行順）
pub const CATEGORY_MATCHERS: [(Category, MatchFn); 8] = [
    (Category::Au, match_au),
    (Category::FieldNumber, match_field_number),
    (Category::Find, match_find),
    (Category::Planum, match_planum),
    (Category::Profile, match_profile),
    (Category::Su, match_su),
    (Category::Zo, match_zo),
    (Category::Tomb, match_tomb),
];

/// 判定一致後の値の取り方
enum Capture {
    /// 先頭固定の一致部分そのもの
    Gate,
    /// トークン全体を大文字小文字区別で走査した最初の一致
    Scan(Regex),
}

/// 先勝ちリストの1エントリ
struct SubPattern {
    name: &'static str,
    gate: Regex,
    capture: Capture,
}

impl SubPattern {
    fn anchored(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            gate: anchored(pattern),
            capture: Capture::Gate,
        }
    }

    fn scanned(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            gate: anchored(pattern),
            capture: Capture::Scan(Regex::new(pattern).unwrap()),
        }
    }

    fn capture(&self, token: &str) -> Option<String> {
        match &self.capture {
            Capture::Gate => self.gate.find(token).map(|m| m.as_str().to_string()),
            Capture::Scan(scan) => scan.find(token).map(|m| m.as_str().to_string()),
        }
    }
}

/// `pattern` を先頭固定・大文字小文字無視でコンパイル
fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("(?i)^(?:{})", pattern)).unwrap()
}

lazy_static::lazy_static! {
    static ref AU_RE: Regex = anchored(r"AU\d+");
    static ref FIELD_NUMBER_RE: Regex = anchored(r"\b(?:AU)?\d{1,5}_V?\d+\b");
    static ref PLANUM_RE: Regex = anchored(r"\b(?:AU)?\d+PL\d+(?:\.\d+)?\b");
    static ref PROFILE_RE: Regex = anchored(r"\b(?:AU)?\d+PR\d+\b");
    static ref SU_RE: Regex = anchored(r"\bPL\d+-\d+");
    static ref TOMB_RE: Regex = anchored(r"\b(?:TT|K)\d+[a-c]?|95[a-c]");

    static ref FIND_PATTERNS: Vec<SubPattern> = vec![
        SubPattern::anchored("AB", r"\bAB\d+(?:\.\d+)?\b"),
        SubPattern::anchored("C", r"\bC\d+[a-z]?"),
        SubPattern::anchored("CHEST", r"\bCHEST\d+\b"),
        SubPattern::anchored("MASK", r"\bMASK\d+\b"),
        SubPattern::anchored("Jackal", r"\bJackal\d+\b"),
        SubPattern::anchored("JDE", r"\bJD?E\d+\D{0,2}\b"),
        SubPattern::anchored("CO", r"\bCO\d+(?:\.\d+)?\b"),
        SubPattern::anchored("W", r"\bW\d+(?:\.\d+)?[a-z]?\b"),
        SubPattern::anchored("U", r"\bUI+\d*x?R?[a-z]?"),
        SubPattern::anchored("DM", r"\bDM\d+\b"),
        SubPattern::anchored("MI", r"\bMI\d+\b"),
        SubPattern::scanned("FN", r"\bFN\d+\.?\d{0,2}(?:[a-z](?:[-|+][a-z])*)?"),
        SubPattern::anchored("T", r"\bT\d+\b"),
        SubPattern::anchored("DN", r"\bDN\d+(?:\.\d+)?\b"),
        SubPattern::anchored("CONE", r"\bCONE\d+(?:\.\d+)?\b"),
    ];

    static ref ZO_PATTERNS: Vec<SubPattern> = vec![
        SubPattern::anchored("ZO", r"\bZO\d+\b"),
        SubPattern::anchored("ZS", r"\bZS\d+[a-z]?(?:\.\d+[a-z]?)?"),
        SubPattern::anchored("ZP", r"\bZP\d+[a-z]?(?:\.\d+[a-z]?)?"),
        SubPattern::anchored("ZK", r"\bZK[SC]?\d+[a-z]?(?:\.\d+[a-z]?)?"),
    ];
}

/// 順序付きリストを実行し、最初に判定が一致したものを採用
///
/// 採用したサブパターンの値が取れなくても、後続は試さない
fn first_match(patterns: &[SubPattern], token: &str) -> Option<(&'static str, String)> {
    let winner = patterns.iter().find(|p| p.gate.is_match(token))?;
    winner.capture(token).map(|value| (winner.name, value))
}

/// 先頭の `AU`（大文字小文字問わず）を除去。AUは暗黙の既定区域
fn strip_au(value: &str) -> String {
    match value.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("AU") => value[2..].to_string(),
        _ => value.to_string(),
    }
}

fn find_anchored(re: &Regex, token: &str) -> Option<String> {
    re.find(token).map(|m| m.as_str().to_string())
}

/// `AU123` → `123`
pub fn match_au(token: &str) -> Option<String> {
    find_anchored(&AU_RE, token).map(|au| strip_au(&au))
}

/// `AU123_V2` → `123_V2`, `45_3` → `45_3`
pub fn match_field_number(token: &str) -> Option<String> {
    find_anchored(&FIELD_NUMBER_RE, token).map(|field| strip_au(&field))
}

/// 出土品番号（最初に一致したサブパターンを採用）
pub fn match_find(token: &str) -> Option<String> {
    first_match(&FIND_PATTERNS, token).map(|(_, value)| value)
}

/// `AU5PL3.2` → `5PL3.2`
pub fn match_planum(token: &str) -> Option<String> {
    find_anchored(&PLANUM_RE, token).map(|planum| strip_au(&planum))
}

/// `AU5PR2` → `5PR2`
pub fn match_profile(token: &str) -> Option<String> {
    find_anchored(&PROFILE_RE, token).map(|profile| strip_au(&profile))
}

/// `PL10-4`
pub fn match_su(token: &str) -> Option<String> {
    find_anchored(&SU_RE, token)
}

pub fn match_zo(token: &str) -> Option<String> {
    first_match(&ZO_PATTERNS, token).map(|(_, value)| value)
}

/// 墓コード（対照表で変換し大文字化）
///
/// `95` は `a`〜`c` の文字が続く場合のみ該当し、単独の `95` は墓として扱わない
pub fn match_tomb(token: &str) -> Option<String> {
    find_anchored(&TOMB_RE, token).map(|tomb| concordance::canonical_tomb(&tomb))
}

/// `token` を判定する出土品サブパターン名
pub fn find_rule(token: &str) -> Option<&'static str> {
    FIND_PATTERNS
        .iter()
        .find(|p| p.gate.is_match(token))
        .map(|p| p.name)
}

/// `token` を判定するZOサブパターン名
pub fn zo_rule(token: &str) -> Option<&'static str> {
    ZO_PATTERNS
        .iter()
        .find(|p| p.gate.is_match(token))
        .map(|p| p.name)
}
