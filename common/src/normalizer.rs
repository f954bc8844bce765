//! パス正規化・トークン分割

/// バックスラッシュ（二重・単独とも）をスラッシュに統一
///
/// # Examples
/// ```
/// use fileserver_common::normalize_path;
///
/// assert_eq!(normalize_path(r"L:\\Fileserver\AU12\x.tif"), "L:/Fileserver/AU12/x.tif");
/// ```
pub fn normalize_path(path: &str) -> String {
    path.replace(r"\\", "/").replace('\\', "/")
}

/// パスを照合用トークンに分割
///
/// フォルダ名・ファイル名をそれぞれトークンにし、空白を含む名前はさらに分割する。
/// ドットは残すので `TT95a.tif` は1トークンのまま
pub fn tokenize(path: &str) -> Vec<String> {
    normalize_path(path)
        .replace('/', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
