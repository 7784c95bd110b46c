//! JSON Output
//!
//! 描画モデルをそのままJSONとして出力する。

use std::io::Write;

use crate::error::Result;
use crate::types::RenderModel;

/// JSON形式のフォーマッター
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn render<W: Write>(&self, model: &RenderModel, writer: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, model)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BreakdownStatement, NoticeDocument};

    #[test]
    fn test_render_empty_model() {
        let mut output = Vec::new();
        JsonFormatter.render(&RenderModel::default(), &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["notices"], serde_json::json!([]));
        assert_eq!(value["breakdown_statements"], serde_json::json!([]));
        assert_eq!(value["tables"], serde_json::json!([]));
    }

    #[test]
    fn test_render_keeps_raw_values() {
        let mut statement = BreakdownStatement::default();
        statement.header.employer_name = "株式会社サンプル".to_string();
        let model = RenderModel {
            notices: vec![NoticeDocument {
                title: "通知書A".to_string(),
                main_text: vec!["a<br/>b".to_string()],
                ..NoticeDocument::default()
            }],
            breakdown_statements: vec![statement],
            tables: Vec::new(),
        };

        let mut output = Vec::new();
        JsonFormatter.render(&model, &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["notices"][0]["title"], "通知書A");
        // 表示用変換はJSON出力には適用しない
        assert_eq!(value["notices"][0]["main_text"][0], "a<br/>b");
        assert_eq!(
            value["breakdown_statements"][0]["header"]["employer_name"],
            "株式会社サンプル"
        );
    }
}
