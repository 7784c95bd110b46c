//! Aggregator Module
//!
//! 読み込んだファイルを分類ごとに振り分け、対応するパーサーで解析して
//! [`RenderModel`]の3つのコレクションを構築するモジュール。

use crate::api::{CsvEncoding, FileKind};
use crate::classify::classify;
use crate::error::Result;
use crate::parser::{parse_breakdown, parse_notice, parse_tabular};
use crate::types::{ParseReport, RawFileSet, RenderModel, SkippedFile};

/// ファイル集合から描画モデルを組み立てる
///
/// 処理は分類ごとの3パス（通知書 → 増減内訳書 → CSV）で行い、各コレクションは
/// ファイル名の辞書順に並びます。
///
/// - 通知書・増減内訳書: 解析に失敗したファイルはコレクションから除外し、
///   [`ParseReport::skipped`]に記録します。実行全体は失敗しません。
/// - CSV: 解析に失敗しても空の表として必ずコレクションに含めます。
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    csv_encoding: CsvEncoding,
}

impl Aggregator {
    pub fn new(csv_encoding: CsvEncoding) -> Self {
        Self { csv_encoding }
    }

    /// ファイル集合を解析して描画モデルと報告を返す
    pub fn aggregate(&self, files: &RawFileSet) -> (RenderModel, ParseReport) {
        let mut report = ParseReport::default();

        let classified: Vec<(FileKind, &str, &[u8])> = files
            .iter()
            .map(|(name, content)| (classify(name), name, content))
            .collect();

        let notices = Self::parse_bucket(&classified, FileKind::Notice, &mut report, parse_notice);
        let breakdown_statements = Self::parse_bucket(
            &classified,
            FileKind::BreakdownStatement,
            &mut report,
            parse_breakdown,
        );
        let tables = classified
            .iter()
            .filter(|(kind, _, _)| *kind == FileKind::Tabular)
            .map(|(_, name, content)| parse_tabular(name, content, self.csv_encoding))
            .collect::<Vec<_>>();

        for (kind, name, _) in &classified {
            if *kind == FileKind::Unrecognized {
                tracing::debug!("Ignoring unrecognized file: {}", name);
                report.unrecognized.push(name.to_string());
            }
        }

        let model = RenderModel {
            notices,
            breakdown_statements,
            tables,
        };

        tracing::info!(
            "Parsed {} notices, {} breakdown statements, {} CSV tables ({} skipped, {} ignored)",
            model.notices.len(),
            model.breakdown_statements.len(),
            model.tables.len(),
            report.skipped_count(),
            report.unrecognized.len()
        );

        (model, report)
    }

    /// 1つの分類のファイルを解析し、成功したものだけを集める
    fn parse_bucket<T>(
        classified: &[(FileKind, &str, &[u8])],
        target: FileKind,
        report: &mut ParseReport,
        parse: fn(&[u8]) -> Result<T>,
    ) -> Vec<T> {
        let mut parsed = Vec::new();

        for (kind, name, content) in classified {
            if *kind != target {
                continue;
            }
            match parse(content) {
                Ok(record) => parsed.push(record),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", name, e);
                    report.skipped.push(SkippedFile {
                        filename: name.to_string(),
                        kind: target,
                        reason: e.to_string(),
                    });
                }
            }
        }

        parsed
    }
}
