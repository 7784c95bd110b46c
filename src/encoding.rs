//! Encoding Module
//!
//! Shift-JISで配布されるCSVやZIPエントリ名をUTF-8の文字列へ正規化するモジュール。
//! 検証ではなくベストエフォートの変換で、失敗しても処理を中断しません。

use encoding_rs::SHIFT_JIS;

use crate::api::CsvEncoding;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Shift-JISのバイト列をUTF-8文字列に変換する
///
/// 不正なバイト列が含まれていてデコードに失敗した場合は、元のバイト列を
/// そのままUTF-8として扱います（UTF-8としても不正な部分は置換文字になります）。
pub fn normalize_shift_jis(raw: &[u8]) -> String {
    match SHIFT_JIS.decode_without_bom_handling_and_without_replacement(raw) {
        Some(text) => text.into_owned(),
        None => {
            tracing::debug!("Shift-JIS decode failed, falling back to raw bytes");
            String::from_utf8_lossy(raw).into_owned()
        }
    }
}

/// CSVファイルの内容を指定された方式で文字列に変換する
///
/// UTF-8のBOMで始まる場合は方式に関係なくUTF-8として扱います。
pub fn decode_csv(raw: &[u8], encoding: CsvEncoding) -> String {
    if let Some(body) = raw.strip_prefix(UTF8_BOM) {
        return String::from_utf8_lossy(body).into_owned();
    }

    match encoding {
        CsvEncoding::ShiftJis => normalize_shift_jis(raw),
        CsvEncoding::Utf8 => String::from_utf8_lossy(raw).into_owned(),
        CsvEncoding::Auto => match std::str::from_utf8(raw) {
            Ok(text) => text.to_string(),
            Err(_) => normalize_shift_jis(raw),
        },
    }
}

/// ZIPエントリ名のバイト列を文字列に変換する
///
/// UTF-8フラグのない日本語のZIP（Windowsで作成されたものなど）は
/// エントリ名がShift-JISで格納されているため、UTF-8として不正な場合はShift-JISで読みます。
pub(crate) fn decode_entry_name(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(name) => name.to_string(),
        Err(_) => normalize_shift_jis(raw),
    }
}
