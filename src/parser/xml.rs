//! XML Element Tree
//!
//! quick-xmlのイベントから、通知書の解析に必要な最小限の要素ツリーを構築する。
//! 要素名は名前空間接頭辞を除いたローカル名で扱います。

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Result, ViewerError};

/// 要素の入れ子の上限
const MAX_DEPTH: usize = 10_000;

/// XML要素
///
/// `text`は要素の直下にある文字データ（テキストとCDATA）を連結したもので、
/// 子要素の中のテキストは含みません。空白のトリムは行いません。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// バイト列を解析してルート要素を返す
    ///
    /// ルート要素が閉じた時点で読み込みを終了し、その後ろの内容は無視します。
    ///
    /// # 戻り値
    ///
    /// * `Err(ViewerError::Xml)` - 構文エラー、UTF-8として不正、閉じられていない要素、
    ///   ルート要素がない場合、入れ子が`MAX_DEPTH`を超える場合
    pub fn parse(content: &[u8]) -> Result<XmlElement> {
        let mut reader = Reader::from_reader(content);
        reader.trim_text(false);

        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    if stack.len() >= MAX_DEPTH {
                        return Err(ViewerError::Xml(format!(
                            "nesting too deep (max: {})",
                            MAX_DEPTH
                        )));
                    }
                    stack.push(Self::from_start(&e)?);
                }
                Event::Empty(e) => {
                    let element = Self::from_start(&e)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| ViewerError::Xml("unexpected closing tag".to_string()))?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => return Ok(element),
                    }
                }
                Event::Text(e) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let Some(current) = stack.last_mut() {
                        let text = std::str::from_utf8(&e)
                            .map_err(|e| ViewerError::Xml(format!("invalid CDATA: {}", e)))?;
                        current.text.push_str(text);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if stack.is_empty() {
            Err(ViewerError::Xml("no root element".to_string()))
        } else {
            Err(ViewerError::Xml(format!(
                "unexpected end of document inside <{}>",
                stack.last().map(|e| e.name.as_str()).unwrap_or_default()
            )))
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<XmlElement> {
        let name = std::str::from_utf8(start.local_name().as_ref())
            .map_err(|e| ViewerError::Xml(format!("invalid element name: {}", e)))?
            .to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| ViewerError::Xml(format!("invalid attribute: {}", e)))?;
            let key = std::str::from_utf8(attr.key.local_name().as_ref())
                .map_err(|e| ViewerError::Xml(format!("invalid attribute name: {}", e)))?
                .to_string();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(XmlElement {
            name,
            attributes,
            ..XmlElement::default()
        })
    }

    /// 指定した名前の最初の子要素
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// 指定した名前のすべての子要素（出現順）
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// 子要素のテキスト。子要素がなければ空文字列
    pub fn child_text(&self, name: &str) -> String {
        self.child(name)
            .map(|child| child.text.clone())
            .unwrap_or_default()
    }

    /// `<parent><item/>...</parent>`の形の子孫要素のテキストを、出現順に集める
    ///
    /// 同名の親要素が複数ある場合は、それらすべての子を順に連結します。
    pub fn nested_texts(&self, parent: &str, item: &str) -> Vec<String> {
        self.children_named(parent)
            .flat_map(|p| p.children_named(item))
            .map(|element| element.text.clone())
            .collect()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
