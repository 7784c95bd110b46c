//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。
//! 解析後のレコードはすべて不変で、1回の実行の中でだけ使われます。

use std::collections::BTreeMap;

use serde::Serialize;

use crate::api::FileKind;

/// 読み込んだファイルの集合（ベースファイル名 → バイト列）
///
/// ディレクトリ構造は捨てられ、キーはパスの最後の要素だけになります。
/// 同じベースファイル名のファイルが複数ある場合は、後から読んだものが上書きします。
/// キーは辞書順に並ぶため、反復順序は実行ごとに変わりません。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFileSet {
    files: BTreeMap<String, Vec<u8>>,
}

impl RawFileSet {
    /// 空の集合を生成
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイルを追加する。既存のキーがあれば置き換え、古い内容を返す
    pub fn insert(&mut self, name: impl Into<String>, content: Vec<u8>) -> Option<Vec<u8>> {
        self.files.insert(name.into(), content)
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// ファイル名の辞書順で反復
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_slice()))
    }

    /// 全ファイルの合計バイト数
    pub fn total_size(&self) -> u64 {
        self.files.values().map(|content| content.len() as u64).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<u8>)> for RawFileSet {
    fn from_iter<I: IntoIterator<Item = (S, Vec<u8>)>>(iter: I) -> Self {
        let mut set = RawFileSet::new();
        for (name, content) in iter {
            set.insert(name, content);
        }
        set
    }
}

/// 通知書の発信者
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
    pub affiliation: String,
}

/// 通知書の添付ファイル項目
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppendixEntry {
    /// 添付ファイルへのリンク（通常はファイル名）
    pub link: String,
    /// 添付ファイルの表題
    pub title: String,
}

/// 通知書本体（`DOC`ルート要素のXML）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoticeDocument {
    pub doc_number: String,
    pub date: String,
    pub author: Author,
    pub title: String,
    /// 本文の段落（`MAINTXT > P`）
    pub main_text: Vec<String>,
    /// 添付ファイル（`APPENDIX`）
    pub appendix: Vec<AppendixEntry>,
    /// 見出しなしの第2段落群（`MAINTXT2 > P`）
    pub main_text2: Vec<String>,
    /// CSV添付ファイル（`APPENDIX2`）
    pub appendix2: Vec<AppendixEntry>,
    /// お知らせの段落（`MAINTXT3 > P`）
    pub main_text3: Vec<String>,
}

/// 増減内訳書のヘッダー部
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BreakdownHeader {
    /// 事業所名
    pub employer_name: String,
    /// 事業所番号
    pub employer_number: String,
    /// 事業所整理記号
    pub registration_code: String,
    /// 人員数
    pub staff_count: String,
    /// 年金事務所
    pub pension_office: String,
    /// 納付目的月
    pub target_month: String,
    /// 納付目的年
    pub target_year: String,
    /// 納付目的年の元号
    pub target_era: String,
    /// お知らせ文
    pub notice: String,
}

/// 標準報酬月額
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StandardCompensation {
    /// 健康保険の標準報酬月額
    pub amount: String,
    /// 発生年月日
    pub effective_date: String,
}

/// 保険料（本月額・前月以前額）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PremiumAmounts {
    pub this_month: String,
    pub prior_months: String,
}

/// 個人別内訳の1行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonRow {
    pub name: String,
    pub process_date: String,
    pub notice_form_code: String,
    pub standard_compensation: StandardCompensation,
    pub health_insurance: PremiumAmounts,
    pub pension_insurance: PremiumAmounts,
}

/// 集計の1行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub standard_compensation: StandardCompensation,
    pub health_insurance: PremiumAmounts,
    pub pension_insurance: PremiumAmounts,
}

/// 保険料増減内訳書（`ZougenUchiwakeSho`ルート要素のXML）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BreakdownStatement {
    pub header: BreakdownHeader,
    pub person_rows: Vec<PersonRow>,
    pub summary_rows: Vec<SummaryRow>,
}

/// CSVファイルを解析した表
///
/// 解析に失敗した場合やレコードが0件の場合は、`headers`と`rows`が空になります。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TabularData {
    pub filename: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularData {
    /// ファイル名だけを持つ空の表
    pub fn empty(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    pub fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }
}

/// 描画対象の3つのコレクション
///
/// 各コレクションはファイル名の辞書順に並びます。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    pub notices: Vec<NoticeDocument>,
    pub breakdown_statements: Vec<BreakdownStatement>,
    pub tables: Vec<TabularData>,
}

/// 解析に失敗して出力から除外されたファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub filename: String,
    pub kind: FileKind,
    pub reason: String,
}

/// 集約処理の報告
///
/// 除外の方針自体（XMLの解析失敗はファイルごと黙って除外）は変えずに、
/// 何が除外されたかを呼び出し元から観測できるようにします。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// 解析に失敗して除外されたXMLファイル
    pub skipped: Vec<SkippedFile>,
    /// どの分類にも該当しなかったファイル名
    pub unrecognized: Vec<String>,
}

impl ParseReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// 1回の変換処理の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// 読み込んだファイル数
    pub files_loaded: usize,
    pub notices: usize,
    pub breakdown_statements: usize,
    pub tables: usize,
    pub report: ParseReport,
}

impl ConversionSummary {
    pub(crate) fn new(files_loaded: usize, model: &RenderModel, report: ParseReport) -> Self {
        Self {
            files_loaded,
            notices: model.notices.len(),
            breakdown_statements: model.breakdown_statements.len(),
            tables: model.tables.len(),
            report,
        }
    }
}
