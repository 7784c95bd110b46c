//! Tabular Data Parser
//!
//! CSVファイルを文字コード正規化のうえ解析し、[`TabularData`]に変換する。
//! XMLの解析とは異なり、失敗してもファイルは除外せず空の表に縮退させます。

use std::io::Cursor;

use csv::ReaderBuilder;

use crate::api::CsvEncoding;
use crate::encoding::decode_csv;
use crate::error::{Result, ViewerError};
use crate::types::TabularData;

/// CSVファイルを解析する
///
/// 最初のレコードをヘッダー行、残りをデータ行とします。
/// 解析に失敗した場合やレコードが0件の場合は、ファイル名だけを持つ空の表を返します。
pub(crate) fn parse_tabular(filename: &str, content: &[u8], encoding: CsvEncoding) -> TabularData {
    let text = decode_csv(content, encoding);

    match read_records(&text) {
        Ok(mut records) if !records.is_empty() => {
            let headers = records.remove(0);
            TabularData {
                filename: filename.to_string(),
                headers,
                rows: records,
            }
        }
        Ok(_) => {
            tracing::debug!("{}: no CSV records, rendering an empty table", filename);
            TabularData::empty(filename)
        }
        Err(e) => {
            tracing::warn!("{}: {}, rendering an empty table", filename, e);
            TabularData::empty(filename)
        }
    }
}

/// CSVテキストをレコードの列に変換する
///
/// すべてのレコードは最初のレコードと同じフィールド数でなければなりません。
/// 空行は読み飛ばされます。引用符の使い方は[`check_quotes`]で先に検証します。
fn read_records(text: &str) -> Result<Vec<Vec<String>>> {
    check_quotes(text)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(Cursor::new(text.as_bytes()));

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(records)
}

#[derive(Debug, Clone, Copy)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// 引用符の使い方を検証する
///
/// `csv`クレートは次のような入力も寛容に読み込むため、読み込み前に拒否します。
///
/// - 引用符で始まらないフィールドの中の`"`（`Al"ice`）
/// - 閉じ引用符の直後に区切り以外の文字が続く（`"a"b`）
/// - 閉じられていない引用符
fn check_quotes(text: &str) -> Result<()> {
    let mut state = QuoteState::FieldStart;
    let mut line = 1;

    for c in text.chars() {
        state = match (state, c) {
            (QuoteState::Quoted, '"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, '"') => QuoteState::Quoted,
            (QuoteState::FieldStart, '"') => QuoteState::Quoted,
            (
                QuoteState::FieldStart | QuoteState::Unquoted | QuoteState::QuoteInQuoted,
                ',' | '\n' | '\r',
            ) => QuoteState::FieldStart,
            (QuoteState::Unquoted, '"') | (QuoteState::QuoteInQuoted, _) => {
                return Err(ViewerError::CsvQuote { line });
            }
            (QuoteState::FieldStart | QuoteState::Unquoted, _) => QuoteState::Unquoted,
        };
        if c == '\n' {
            line += 1;
        }
    }

    match state {
        QuoteState::Quoted => Err(ViewerError::CsvQuote { line }),
        _ => Ok(()),
    }
}
