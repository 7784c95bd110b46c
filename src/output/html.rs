//! HTML Output
//!
//! 描画モデルを1つのHTML文書として出力する。
//! 文書の並びは通知書、増減内訳書、CSVの順で、各ブロックは元のコレクションの順序を保ちます。
//!
//! 値の出力は次の3通りです。
//!
//! - 通常のテキスト（表題、メタデータ、氏名、CSVのヘッダーなど）: HTMLエスケープ
//! - 本文段落とお知らせ文: `process_text`（マークアップは信頼してそのまま出力）
//! - 金額とCSVのセル: `format_number`

use std::io::Write;

use super::transforms::{escape_html, Transforms};
use crate::error::Result;
use crate::types::{
    AppendixEntry, BreakdownStatement, NoticeDocument, PremiumAmounts, RenderModel, TabularData,
};

const STYLE: &str = include_str!("../../templates/viewer.css");
const SCRIPT: &str = include_str!("../../templates/transpose.js");

/// 文書のタイトル
const PAGE_TITLE: &str = "e-Gov 通知書ビューアー";

/// 保険料の4列分の見出し（本月額・前月以前額 × 健康保険・厚生年金）
const PREMIUM_HEADERS: [&str; 4] = [
    "健康保険料<br>（本月額）",
    "健康保険料<br>（前月以前額）",
    "厚生年金保険料<br>（本月額）",
    "厚生年金保険料<br>（前月以前額）",
];

/// HTML形式のフォーマッター
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormatter {
    transforms: Transforms,
}

impl HtmlFormatter {
    pub fn new(transforms: Transforms) -> Self {
        Self { transforms }
    }

    /// 描画モデル全体をHTML文書として出力する
    pub fn render<W: Write>(&self, model: &RenderModel, writer: &mut W) -> Result<()> {
        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html lang=\"ja\">")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "    <meta charset=\"UTF-8\">")?;
        writeln!(
            writer,
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(writer, "    <title>{}</title>", PAGE_TITLE)?;
        writeln!(writer, "    <style>\n{}    </style>", STYLE)?;
        writeln!(writer, "    <script>\n{}    </script>", SCRIPT)?;
        writeln!(writer, "</head>")?;
        writeln!(writer, "<body>")?;

        for notice in &model.notices {
            self.render_notice(notice, writer)?;
        }
        for statement in &model.breakdown_statements {
            self.render_breakdown(statement, writer)?;
        }
        for (index, table) in model.tables.iter().enumerate() {
            self.render_table(index, table, writer)?;
        }

        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")?;
        writer.flush()?;
        Ok(())
    }

    /// 通知書のブロック
    ///
    /// 段落や添付ファイルの一覧が空のセクションは、見出しごと出力しません。
    fn render_notice<W: Write>(&self, notice: &NoticeDocument, writer: &mut W) -> Result<()> {
        writeln!(writer, "<div class=\"document\">")?;
        writeln!(writer, "    <h1>{}</h1>", escape_html(&notice.title))?;
        writeln!(writer, "    <div class=\"metadata\">")?;
        write_metadata_item(writer, "文書番号", &escape_html(&notice.doc_number))?;
        write_metadata_item(writer, "日付", &escape_html(&notice.date))?;
        write_metadata_item(
            writer,
            "発信者",
            &format!(
                "{}（{}）",
                escape_html(&notice.author.name),
                escape_html(&notice.author.affiliation)
            ),
        )?;
        writeln!(writer, "    </div>")?;

        self.write_paragraphs(writer, Some("本文"), &notice.main_text)?;
        write_appendix_list(writer, "添付ファイル", &notice.appendix)?;
        self.write_paragraphs(writer, None, &notice.main_text2)?;
        write_appendix_list(writer, "CSV ファイル", &notice.appendix2)?;
        self.write_paragraphs(writer, Some("お知らせ"), &notice.main_text3)?;

        writeln!(writer, "</div>")?;
        Ok(())
    }

    /// 増減内訳書のブロック
    fn render_breakdown<W: Write>(&self, statement: &BreakdownStatement, writer: &mut W) -> Result<()> {
        let header = &statement.header;

        writeln!(writer, "<div class=\"document\">")?;
        writeln!(writer, "    <h1>保険料増減内訳書</h1>")?;
        writeln!(writer, "    <div class=\"metadata\">")?;
        write_metadata_item(writer, "事業所名", &escape_html(&header.employer_name))?;
        write_metadata_item(writer, "事業所番号", &escape_html(&header.employer_number))?;
        write_metadata_item(writer, "事業所整理記号", &escape_html(&header.registration_code))?;
        write_metadata_item(writer, "人員数", &escape_html(&header.staff_count))?;
        write_metadata_item(writer, "年金事務所", &escape_html(&header.pension_office))?;
        write_metadata_item(
            writer,
            "納付対象",
            &format!(
                "{}{}年{}月分",
                escape_html(&header.target_era),
                escape_html(&header.target_year),
                escape_html(&header.target_month)
            ),
        )?;
        writeln!(writer, "    </div>")?;

        if !header.notice.is_empty() {
            writeln!(
                writer,
                "    <div class=\"paragraph\">{}</div>",
                (self.transforms.process_text)(&header.notice)
            )?;
        }

        if !statement.person_rows.is_empty() {
            writeln!(writer, "    <h2>個人別内訳</h2>")?;
            write_table_start(writer, &["氏名", "処理年月日", "届出書コード"])?;
            for row in &statement.person_rows {
                writeln!(writer, "                <tr>")?;
                write_cell(writer, &escape_html(&row.name))?;
                write_cell(writer, &escape_html(&row.process_date))?;
                write_cell(writer, &escape_html(&row.notice_form_code))?;
                self.write_premium_cells(writer, &row.health_insurance, &row.pension_insurance)?;
                writeln!(writer, "                </tr>")?;
            }
            write_table_end(writer)?;
        }

        if !statement.summary_rows.is_empty() {
            writeln!(writer, "    <h2>集計</h2>")?;
            write_table_start(writer, &["項目"])?;
            for row in &statement.summary_rows {
                writeln!(writer, "                <tr>")?;
                write_cell(writer, &escape_html(&row.label))?;
                self.write_premium_cells(writer, &row.health_insurance, &row.pension_insurance)?;
                writeln!(writer, "                </tr>")?;
            }
            write_table_end(writer)?;
        }

        writeln!(writer, "</div>")?;
        Ok(())
    }

    /// CSVのブロック
    ///
    /// ヘッダーがない（解析に失敗した）表は、見出しだけを出力します。
    fn render_table<W: Write>(&self, index: usize, table: &TabularData, writer: &mut W) -> Result<()> {
        writeln!(writer, "<div class=\"document csv-section\">")?;
        writeln!(writer, "    <h2>CSV: {}</h2>", escape_html(&table.filename))?;

        if table.has_headers() {
            writeln!(
                writer,
                "    <button class=\"transpose-btn\" onclick=\"transposeTable({})\">行列を反転</button>",
                index
            )?;
            writeln!(
                writer,
                "    <div class=\"csv-table\" id=\"csv-table-{}\">",
                index
            )?;
            writeln!(writer, "        <table>")?;
            writeln!(writer, "            <thead>")?;
            writeln!(writer, "                <tr>")?;
            for header in &table.headers {
                writeln!(writer, "                    <th>{}</th>", escape_html(header))?;
            }
            writeln!(writer, "                </tr>")?;
            writeln!(writer, "            </thead>")?;
            writeln!(writer, "            <tbody>")?;
            for row in &table.rows {
                writeln!(writer, "                <tr>")?;
                for cell in row {
                    write_cell(writer, &(self.transforms.format_number)(cell))?;
                }
                writeln!(writer, "                </tr>")?;
            }
            writeln!(writer, "            </tbody>")?;
            writeln!(writer, "        </table>")?;
            writeln!(writer, "    </div>")?;
        }

        writeln!(writer, "</div>")?;
        Ok(())
    }

    fn write_paragraphs<W: Write>(
        &self,
        writer: &mut W,
        heading: Option<&str>,
        paragraphs: &[String],
    ) -> Result<()> {
        if paragraphs.is_empty() {
            return Ok(());
        }
        if let Some(heading) = heading {
            writeln!(writer, "    <h2>{}</h2>", heading)?;
        }
        for paragraph in paragraphs {
            writeln!(
                writer,
                "    <div class=\"paragraph\">{}</div>",
                (self.transforms.process_text)(paragraph)
            )?;
        }
        Ok(())
    }

    fn write_premium_cells<W: Write>(
        &self,
        writer: &mut W,
        health: &PremiumAmounts,
        pension: &PremiumAmounts,
    ) -> Result<()> {
        let format_number = self.transforms.format_number;
        write_cell(writer, &format_number(&health.this_month))?;
        write_cell(writer, &format_number(&health.prior_months))?;
        write_cell(writer, &format_number(&pension.this_month))?;
        write_cell(writer, &format_number(&pension.prior_months))?;
        Ok(())
    }
}

fn write_metadata_item<W: Write>(writer: &mut W, label: &str, value: &str) -> Result<()> {
    writeln!(
        writer,
        "        <div class=\"metadata-item\"><span class=\"metadata-label\">{}:</span>{}</div>",
        label, value
    )?;
    Ok(())
}

fn write_appendix_list<W: Write>(writer: &mut W, heading: &str, entries: &[AppendixEntry]) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    writeln!(writer, "    <h2>{}</h2>", heading)?;
    writeln!(writer, "    <ul class=\"appendix-list\">")?;
    for entry in entries {
        writeln!(writer, "        <li>{}</li>", escape_html(&entry.title))?;
    }
    writeln!(writer, "    </ul>")?;
    Ok(())
}

/// 先頭の固定列に続けて保険料4列の見出しを持つ表を開始する
fn write_table_start<W: Write>(writer: &mut W, leading_headers: &[&str]) -> Result<()> {
    writeln!(writer, "    <div class=\"csv-table\">")?;
    writeln!(writer, "        <table>")?;
    writeln!(writer, "            <thead>")?;
    writeln!(writer, "                <tr>")?;
    for header in leading_headers.iter().chain(PREMIUM_HEADERS.iter()) {
        writeln!(writer, "                    <th>{}</th>", header)?;
    }
    writeln!(writer, "                </tr>")?;
    writeln!(writer, "            </thead>")?;
    writeln!(writer, "            <tbody>")?;
    Ok(())
}

fn write_table_end<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "            </tbody>")?;
    writeln!(writer, "        </table>")?;
    writeln!(writer, "    </div>")?;
    Ok(())
}

fn write_cell<W: Write>(writer: &mut W, content: &str) -> Result<()> {
    writeln!(writer, "                    <td>{}</td>", content)?;
    Ok(())
}
