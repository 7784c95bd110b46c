//! Builder Module
//!
//! Fluent Builder APIを提供し、`Viewer`インスタンスを段階的に構築する。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::aggregate::Aggregator;
use crate::api::{CsvEncoding, OutputFormat};
use crate::error::{Result, ViewerError};
use crate::output::{OutputFormatter, Transforms};
use crate::security::SecurityConfig;
use crate::source::load_source;
use crate::types::{ConversionSummary, RawFileSet};

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone, Default)]
pub(crate) struct ViewerConfig {
    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// CSVの文字エンコーディング
    pub csv_encoding: CsvEncoding,

    /// 読み込み時のセキュリティ制限
    pub security: SecurityConfig,

    /// HTML出力時の表示用変換
    pub transforms: Transforms,
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use egov_viewer::{CsvEncoding, OutputFormat, ViewerBuilder};
///
/// # fn main() -> Result<(), egov_viewer::ViewerError> {
/// let viewer = ViewerBuilder::new()
///     .with_output_format(OutputFormat::Json)
///     .with_csv_encoding(CsvEncoding::Auto)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ViewerBuilder {
    config: ViewerConfig,
}

impl ViewerBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 出力フォーマット: HTML
    /// - CSVエンコーディング: Shift-JIS
    /// - セキュリティ制限: [`SecurityConfig::default`]
    /// - 表示用変換: `process_text` と `format_number`
    pub fn new() -> Self {
        Self::default()
    }

    /// 出力フォーマットを指定する
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// CSVファイルの文字エンコーディングを指定する
    ///
    /// ```rust
    /// use egov_viewer::{CsvEncoding, ViewerBuilder};
    ///
    /// let builder = ViewerBuilder::new().with_csv_encoding(CsvEncoding::Utf8);
    /// ```
    pub fn with_csv_encoding(mut self, encoding: CsvEncoding) -> Self {
        self.config.csv_encoding = encoding;
        self
    }

    /// 読み込み時のセキュリティ制限を指定する
    pub fn with_security_config(mut self, security: SecurityConfig) -> Self {
        self.config.security = security;
        self
    }

    /// HTML出力時の表示用変換を差し替える
    pub fn with_transforms(mut self, transforms: Transforms) -> Self {
        self.config.transforms = transforms;
        self
    }

    /// 設定を検証し、`Viewer`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `ViewerError::Config(String)`: セキュリティ制限の値が不正な場合
    pub fn build(self) -> Result<Viewer> {
        self.config.security.validate()?;
        Ok(Viewer::new(self.config))
    }
}

/// 変換処理のファサード
///
/// ディレクトリまたはZIPアーカイブを読み込み、1つのHTML（またはJSON）文書を出力します。
///
/// # 使用例
///
/// ```rust,no_run
/// use egov_viewer::ViewerBuilder;
///
/// # fn main() -> Result<(), egov_viewer::ViewerError> {
/// let viewer = ViewerBuilder::new().build()?;
/// let summary = viewer.convert_to_file("downloads/notice.zip", "output.html")?;
/// println!("{} notices", summary.notices);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Viewer {
    config: ViewerConfig,
}

impl Viewer {
    pub(crate) fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// 入力パスを読み込み、変換結果を`output`に書き込む
    ///
    /// # 処理フロー
    ///
    /// 1. 入力の種類を判定し、ファイル集合を読み込む
    /// 2. ファイルを分類して解析し、描画モデルを組み立てる
    /// 3. 描画モデルを出力する
    ///
    /// 読み込みに失敗した場合は何も書き込まずにエラーを返します。
    pub fn convert<P: AsRef<Path>, W: Write>(
        &self,
        source: P,
        output: W,
    ) -> Result<ConversionSummary> {
        let files = load_source(source.as_ref(), &self.config.security)?;
        self.convert_files(&files, output)
    }

    /// 読み込み済みのファイル集合を変換する
    ///
    /// ファイルシステムを介さずに使えるため、テストや組み込み用途に向いています。
    ///
    /// ```rust
    /// use egov_viewer::{RawFileSet, ViewerBuilder};
    ///
    /// # fn main() -> Result<(), egov_viewer::ViewerError> {
    /// let mut files = RawFileSet::new();
    /// files.insert("data.csv", b"name,amount\nAlice,100.50".to_vec());
    ///
    /// let viewer = ViewerBuilder::new().build()?;
    /// let mut html = Vec::new();
    /// let summary = viewer.convert_files(&files, &mut html)?;
    /// assert_eq!(summary.tables, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_files<W: Write>(
        &self,
        files: &RawFileSet,
        mut output: W,
    ) -> Result<ConversionSummary> {
        let (model, report) = Aggregator::new(self.config.csv_encoding).aggregate(files);

        let formatter =
            OutputFormatter::from_format(self.config.output_format, self.config.transforms);
        formatter.render(&model, &mut output)?;

        Ok(ConversionSummary::new(files.len(), &model, report))
    }

    /// 入力パスを変換し、結果を文字列として返す
    pub fn convert_to_string<P: AsRef<Path>>(&self, source: P) -> Result<String> {
        let mut buffer = Vec::new();
        self.convert(source, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            ViewerError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }

    /// 入力パスを変換し、結果をファイルに書き込む
    ///
    /// 出力ファイルは入力の読み込みに成功した後で作成（既存なら上書き）されます。
    pub fn convert_to_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        source: P,
        output_path: Q,
    ) -> Result<ConversionSummary> {
        let output_path = output_path.as_ref();
        let files = load_source(source.as_ref(), &self.config.security)?;

        let file = File::create(output_path).map_err(|source| ViewerError::Write {
            path: output_path.to_path_buf(),
            source,
        })?;
        let summary = self.convert_files(&files, BufWriter::new(file))?;

        tracing::info!("Wrote {}", output_path.display());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_files() -> RawFileSet {
        vec![
            (
                "notice.xml",
                "<DOC><BODY><TITLE>通知書A</TITLE></BODY></DOC>".as_bytes().to_vec(),
            ),
            ("data.csv", b"name,amount\nAlice,100.50".to_vec()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_viewer_builder_new() {
        let builder = ViewerBuilder::new();
        assert_eq!(builder.config.output_format, OutputFormat::Html);
        assert_eq!(builder.config.csv_encoding, CsvEncoding::ShiftJis);
        assert_eq!(builder.config.security, SecurityConfig::default());
        assert_eq!(builder.config.transforms, Transforms::default());
    }

    #[test]
    fn test_with_setters() {
        let security = SecurityConfig {
            max_file_count: 3,
            ..SecurityConfig::default()
        };
        let builder = ViewerBuilder::new()
            .with_output_format(OutputFormat::Json)
            .with_csv_encoding(CsvEncoding::Auto)
            .with_security_config(security.clone());

        assert_eq!(builder.config.output_format, OutputFormat::Json);
        assert_eq!(builder.config.csv_encoding, CsvEncoding::Auto);
        assert_eq!(builder.config.security, security);
    }

    #[test]
    fn test_build_rejects_invalid_security_config() {
        let result = ViewerBuilder::new()
            .with_security_config(SecurityConfig {
                max_file_count: 0,
                ..SecurityConfig::default()
            })
            .build();

        match result {
            Err(ViewerError::Config(msg)) => assert!(msg.contains("max_file_count")),
            other => panic!("Expected Config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_convert_files_html() {
        let viewer = ViewerBuilder::new().build().unwrap();
        let mut output = Vec::new();
        let summary = viewer.convert_files(&sample_files(), &mut output).unwrap();

        assert_eq!(summary.files_loaded, 2);
        assert_eq!(summary.notices, 1);
        assert_eq!(summary.tables, 1);

        let html = String::from_utf8(output).unwrap();
        assert!(html.contains("<h1>通知書A</h1>"));
        assert!(html.contains("<td>100<span class=\"decimal\">.50</span></td>"));
    }

    #[test]
    fn test_convert_files_json() {
        let viewer = ViewerBuilder::new()
            .with_output_format(OutputFormat::Json)
            .build()
            .unwrap();
        let mut output = Vec::new();
        viewer.convert_files(&sample_files(), &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["notices"][0]["title"], "通知書A");
        assert_eq!(value["tables"][0]["rows"][0][1], "100.50");
    }

    #[test]
    fn test_convert_to_file_from_directory() {
        let input = TempDir::new().unwrap();
        fs::write(input.path().join("data.csv"), b"name\nAlice").unwrap();
        let out_dir = TempDir::new().unwrap();
        let output_path = out_dir.path().join("output.html");

        let viewer = ViewerBuilder::new().build().unwrap();
        let summary = viewer.convert_to_file(input.path(), &output_path).unwrap();

        assert_eq!(summary.tables, 1);
        let html = fs::read_to_string(&output_path).unwrap();
        assert!(html.contains("<h2>CSV: data.csv</h2>"));
    }

    #[test]
    fn test_convert_to_file_does_not_create_output_on_load_failure() {
        let out_dir = TempDir::new().unwrap();
        let output_path = out_dir.path().join("output.html");

        let viewer = ViewerBuilder::new().build().unwrap();
        let result = viewer.convert_to_file(out_dir.path().join("missing"), &output_path);

        assert!(matches!(result, Err(ViewerError::Stat { .. })));
        assert!(!output_path.exists());
    }

    #[test]
    fn test_convert_to_file_reports_unwritable_output() {
        let input = TempDir::new().unwrap();
        let viewer = ViewerBuilder::new().build().unwrap();
        let bad_output = input.path().join("no-such-dir").join("output.html");

        let result = viewer.convert_to_file(input.path(), &bad_output);
        match result {
            Err(ViewerError::Write { path, .. }) => assert_eq!(path, bad_output),
            other => panic!("Expected Write error, got {:?}", other.map(|_| ())),
        }
    }
}
