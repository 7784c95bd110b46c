//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod html;
mod json;
mod transforms;

use crate::api::OutputFormat;
use crate::error::Result;
use crate::types::RenderModel;
use std::io::Write;

pub use html::HtmlFormatter;
pub use json::JsonFormatter;
pub use transforms::{escape_html, format_number, process_text, Transforms};

/// 出力フォーマッター（Strategy Pattern）
///
/// 各出力フォーマット（HTML, JSON）をenumとして表現します。
#[derive(Debug, Clone, Copy)]
pub enum OutputFormatter {
    Html(HtmlFormatter),
    Json(JsonFormatter),
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    ///
    /// 表示用変換はHTML出力でだけ使われます。
    pub fn from_format(format: OutputFormat, transforms: Transforms) -> Self {
        match format {
            OutputFormat::Html => OutputFormatter::Html(HtmlFormatter::new(transforms)),
            OutputFormat::Json => OutputFormatter::Json(JsonFormatter),
        }
    }

    /// 描画モデルを指定されたフォーマットで出力する
    pub fn render<W: Write>(&self, model: &RenderModel, writer: &mut W) -> Result<()> {
        match self {
            OutputFormatter::Html(formatter) => formatter.render(model, writer),
            OutputFormatter::Json(formatter) => formatter.render(model, writer),
        }
    }
}
