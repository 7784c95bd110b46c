//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;
use thiserror::Error;

/// egov-viewerクレート全体で使用するエラー型
///
/// 入力の読み込み、解析、HTML出力処理中に発生するすべてのエラーを
/// 統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - 読み込み系（`Stat`, `Read`, `Walk`, `ArchiveOpen`, `ArchiveEntry`, `UnsupportedInput`）:
///   実行全体を中断する致命的エラー。メッセージには失敗した操作とパスが含まれます。
/// - 解析系（`Xml`, `Csv`, `CsvQuote`）: ファイル単位のエラー。集約処理の内部で握りつぶされ、
///   呼び出し元まで伝播することはありません。
/// - 出力系（`Write`, `Io`, `Json`）: 出力ファイルの作成・書き込みの失敗。
/// - 設定系（`Config`, `SecurityViolation`）
///
/// # 使用例
///
/// ```rust,no_run
/// use egov_viewer::{ViewerBuilder, ViewerError};
///
/// let viewer = ViewerBuilder::new().build().unwrap();
/// match viewer.convert_to_string("no/such/dir") {
///     Err(ViewerError::Stat { path, .. }) => println!("missing: {}", path.display()),
///     Err(e) => println!("{}", e),
///     Ok(_) => {}
/// }
/// ```
#[derive(Error, Debug)]
pub enum ViewerError {
    /// 入力パスのメタデータ取得に失敗した（存在しない、権限がないなど）
    #[error("failed to stat '{path}': {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// ファイル内容の読み込みに失敗した
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// ディレクトリの走査に失敗した
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// ZIPアーカイブを開けなかった
    #[error("failed to open archive '{path}': {source}")]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// ZIPアーカイブ内のエントリを開けなかった
    #[error("failed to open archive entry #{index}: {source}")]
    ArchiveEntry {
        index: usize,
        #[source]
        source: zip::result::ZipError,
    },

    /// ディレクトリでもZIPファイルでもない入力
    #[error("'{path}' is neither a directory nor a .zip archive")]
    UnsupportedInput { path: PathBuf },

    /// 出力ファイルの作成・書き込みに失敗した
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O操作中に発生したエラー（出力ライターへの書き込みなど）
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML文書の構造解析エラー
    #[error("XML parse error: {0}")]
    Xml(String),

    /// CSVの解析エラー
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// CSVの引用符の誤り（引用符で始まらないフィールド内の`"`、閉じ引用符の後の文字、閉じられていない引用符）
    #[error("CSV parse error: bare or misplaced quote on line {line}")]
    CsvQuote { line: usize },

    /// JSON出力時のシリアライズエラー
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ViewerBuilder::build()`時に設定を検証し、無効な設定が検出された場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// ZIP bomb攻撃、ファイルサイズ制限などのセキュリティ制限に違反した場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

impl From<quick_xml::Error> for ViewerError {
    fn from(err: quick_xml::Error) -> Self {
        ViewerError::Xml(err.to_string())
    }
}

/// クレート内で使用する結果型
pub type Result<T> = std::result::Result<T, ViewerError>;
