//! Notice Document Parser
//!
//! 通知書本体（`DOC > BODY`）のXMLを[`NoticeDocument`]に変換する。

use crate::error::{Result, ViewerError};
use crate::parser::xml::XmlElement;
use crate::types::{AppendixEntry, Author, NoticeDocument};

/// 通知書XMLのルート要素名
const ROOT: &str = "DOC";

/// 通知書XMLを解析する
///
/// ルート要素が`DOC`でない場合はエラーです。`BODY`やその他の要素が欠けている場合は
/// 該当フィールドを空のままにします。段落のテキストはトリムしません。
pub(crate) fn parse_notice(content: &[u8]) -> Result<NoticeDocument> {
    let root = XmlElement::parse(content)?;
    if root.name != ROOT {
        return Err(ViewerError::Xml(format!(
            "expected root element <{}>, found <{}>",
            ROOT, root.name
        )));
    }

    let Some(body) = root.child("BODY") else {
        return Ok(NoticeDocument::default());
    };

    let author = body
        .child("AUTHOR")
        .map(|author| Author {
            name: author.child_text("NAME"),
            affiliation: author.child_text("AFF"),
        })
        .unwrap_or_default();

    Ok(NoticeDocument {
        doc_number: body.child_text("DOCNO"),
        date: body.child_text("DATE"),
        author,
        title: body.child_text("TITLE"),
        main_text: body.nested_texts("MAINTXT", "P"),
        appendix: appendix_entries(body, "APPENDIX"),
        main_text2: body.nested_texts("MAINTXT2", "P"),
        appendix2: appendix_entries(body, "APPENDIX2"),
        main_text3: body.nested_texts("MAINTXT3", "P"),
    })
}

/// 添付ファイル要素から項目を取り出す
///
/// 1つの添付ファイル要素に`DOCLINK`と`APPTITLE`が複数ある場合は、出現順に組にします。
/// 片方が足りない場合、その側は空文字列になります。
/// `DOCLINK`のテキストが空であれば`REF`属性の値をリンクとして使います。
fn appendix_entries(body: &XmlElement, name: &str) -> Vec<AppendixEntry> {
    let mut entries = Vec::new();

    for appendix in body.children_named(name) {
        let links: Vec<&XmlElement> = appendix.children_named("DOCLINK").collect();
        let titles: Vec<&XmlElement> = appendix.children_named("APPTITLE").collect();

        for i in 0..links.len().max(titles.len()) {
            let link = links
                .get(i)
                .map(|link| {
                    if link.text.trim().is_empty() {
                        link.attribute("REF").unwrap_or_default().to_string()
                    } else {
                        link.text.clone()
                    }
                })
                .unwrap_or_default();
            let title = titles
                .get(i)
                .map(|title| title.text.clone())
                .unwrap_or_default();

            entries.push(AppendixEntry { link, title });
        }
    }

    entries
}
