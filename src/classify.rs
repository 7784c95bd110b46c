//! Classification Module
//!
//! ファイル名から入力ファイルの分類を決定する。分類の判定はここだけで行う。

use crate::api::FileKind;

/// 増減内訳書を示すファイル名中の文字列
pub const BREAKDOWN_MARKER: &str = "増減内訳書";

/// ファイル名を分類する
///
/// 拡張子の比較は大文字小文字を区別します（`.XML`や`.CSV`は対象外）。
///
/// # 使用例
///
/// ```rust
/// use egov_viewer::{classify, FileKind};
///
/// assert_eq!(classify("通知書.xml"), FileKind::Notice);
/// assert_eq!(classify("増減内訳書_2024.xml"), FileKind::BreakdownStatement);
/// assert_eq!(classify("data.csv"), FileKind::Tabular);
/// assert_eq!(classify("scan.pdf"), FileKind::Unrecognized);
/// ```
pub fn classify(filename: &str) -> FileKind {
    if filename.ends_with(".xml") {
        if filename.contains(BREAKDOWN_MARKER) {
            FileKind::BreakdownStatement
        } else {
            FileKind::Notice
        }
    } else if filename.ends_with(".csv") {
        FileKind::Tabular
    } else {
        FileKind::Unrecognized
    }
}
