//! 正規化・サニタイズ処理
//!
//! - strip_quotes: CSVの引用符の残骸を除去（抽出時の唯一の正規化）
//! - sanitize_filename: ダウンロード先ファイル名の安全化
//! - sql_escape / sql_comment: SQLテンプレートへの埋め込み用

use regex::Regex;

/// ファイル名の最大バイト数（プレフィックス分の余裕を残す）
const MAX_FILENAME_BYTES: usize = 200;

lazy_static::lazy_static! {
    // パス区切り・制御文字・Windowsで使えない文字
    static ref UNSAFE_FILENAME_CHARS: Regex = Regex::new(r#"[\x00-\x1f\x7f/\\:*?"<>|]"#).unwrap();
}

/// 前後の `"` をすべて取り除く
///
/// 空白のトリムは行わない。冪等。
pub fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"')
}

/// ファイル名として安全な文字列に変換
///
/// 危険な文字は `_` に置換し、先頭のドットと前後の空白を除去する。
/// 結果が空になりうるので、呼び出し側でフォールバックを用意すること。
pub fn sanitize_filename(name: &str) -> String {
    let replaced = UNSAFE_FILENAME_CHARS.replace_all(name, "_");
    let trimmed = replaced
        .trim_start_matches(|c: char| c == '.' || c.is_whitespace())
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace());
    truncate_at_char_boundary(trimmed, MAX_FILENAME_BYTES).to_string()
}

/// SQL文字列リテラル用にエスケープ（`'` を二重化、NULを除去）
pub fn sql_escape(value: &str) -> String {
    value.replace('\0', "").replace('\'', "''")
}

/// SQLの行コメントに埋め込めるよう改行を潰す
pub fn sql_comment(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

fn truncate_at_char_boundary(value: &str, max_bytes: usize) -> &str {
    if value.len() <= max_bytes {
        return value;
    }
    let mut end = max_bytes;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"12 Elm St\""), "12 Elm St");
        assert_eq!(strip_quotes("\"\"\"4\"\"\""), "4");
        assert_eq!(strip_quotes("\"\""), "");
        assert_eq!(strip_quotes("He said \"hi\" there"), "He said \"hi\" there");
    }

    #[test]
    fn test_strip_quotes_keeps_whitespace() {
        assert_eq!(strip_quotes(" \"a\" "), " \"a\" ");
        assert_eq!(strip_quotes("\" a \""), " a ");
    }

    #[test]
    fn test_strip_quotes_idempotent() {
        for input in ["\"x\"", "x", "\"\"y", "", "\" 12 Elm St \"", "a\"b"] {
            let once = strip_quotes(input);
            assert_eq!(strip_quotes(once), once, "入力: {:?}", input);
        }
    }

    #[test]
    fn test_sanitize_filename_plain() {
        assert_eq!(sanitize_filename("IMG_1234.jpg"), "IMG_1234.jpg");
        assert_eq!(sanitize_filename("front yard.jpg"), "front yard.jpg");
    }

    #[test]
    fn test_sanitize_filename_path_traversal() {
        let name = sanitize_filename("../../etc/passwd");
        assert!(!name.contains('/'));
        assert!(!name.starts_with('.'));
        assert_eq!(name, "_.._etc_passwd");
    }

    #[test]
    fn test_sanitize_filename_illegal_chars() {
        assert_eq!(sanitize_filename("a:b*c?d\"e<f>g|h\\i.png"), "a_b_c_d_e_f_g_h_i.png");
        assert_eq!(sanitize_filename("tab\there\n.jpg"), "tab_here_.jpg");
    }

    #[test]
    fn test_sanitize_filename_empty_result() {
        assert_eq!(sanitize_filename(""), "");
        assert_eq!(sanitize_filename("..."), "");
        assert_eq!(sanitize_filename("  "), "");
    }

    #[test]
    fn test_sanitize_filename_truncates_on_char_boundary() {
        let long = "写".repeat(100);
        let name = sanitize_filename(&long);
        assert!(name.len() <= MAX_FILENAME_BYTES);
        assert!(name.chars().all(|c| c == '写'));
    }

    #[test]
    fn test_sql_escape() {
        assert_eq!(sql_escape("12 Elm St"), "12 Elm St");
        assert_eq!(sql_escape("O'Brien's Loft"), "O''Brien''s Loft");
        assert_eq!(sql_escape("x'); DROP TABLE property; --"), "x''); DROP TABLE property; --");
        assert_eq!(sql_escape("a\0b"), "ab");
    }

    #[test]
    fn test_sql_comment_flattens_newlines() {
        assert_eq!(sql_comment("line1\nDROP TABLE x;"), "line1 DROP TABLE x;");
        assert_eq!(sql_comment("a\r\nb"), "a  b");
    }
}
