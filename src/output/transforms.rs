//! Presentation Transforms
//!
//! HTML出力時に値へ適用する表示用の変換関数。
//! どちらも純粋関数で、[`Transforms`]を通じて描画処理へ明示的に渡されます。

/// 本文段落の改行タグを`<br>`に正規化する
///
/// `<br/>`と`<br />`を`<br>`に置き換えます。それ以外のマークアップ（リンクなど）は
/// エスケープせずにそのまま出力します。
///
/// 入力は発行元から届いた文書であり、利用者が入力したものではないという前提で
/// 信頼しています。信頼できない入力を扱う場合はここでのエスケープが必要です。
///
/// ```rust
/// use egov_viewer::process_text;
///
/// assert_eq!(process_text("line1<br/>line2<br />line3"), "line1<br>line2<br>line3");
/// ```
pub fn process_text(text: &str) -> String {
    text.replace("<br/>", "<br>").replace("<br />", "<br>")
}

/// 金額の小数部を薄く表示するためのspanで囲む
///
/// 前後の空白を取り除き、`.`でちょうど2つに分かれる場合だけ小数部を
/// `<span class="decimal">`で囲みます。それ以外は取り除いた値をそのまま返します。
/// 整数部と小数部はHTMLエスケープされます。
///
/// ```rust
/// use egov_viewer::format_number;
///
/// assert_eq!(format_number("1234.56"), r#"1234<span class="decimal">.56</span>"#);
/// assert_eq!(format_number(" 1234 "), "1234");
/// assert_eq!(format_number(""), "");
/// ```
pub fn format_number(text: &str) -> String {
    let text = text.trim();
    let mut parts = text.split('.');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(integer), Some(fraction), None) => format!(
            "{}<span class=\"decimal\">.{}</span>",
            escape_html(integer),
            escape_html(fraction)
        ),
        _ => escape_html(text),
    }
}

/// テキストをHTMLの要素内容・属性値として安全な形にエスケープする
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 描画処理に渡す表示用変換の組
///
/// デフォルトは[`process_text`]と[`format_number`]です。
/// 差し替えることで、例えば本文段落もエスケープする厳格な出力にできます。
///
/// ```rust
/// use egov_viewer::{escape_html, Transforms};
///
/// let strict = Transforms {
///     process_text: escape_html,
///     ..Transforms::default()
/// };
/// assert_eq!((strict.process_text)("<b>x</b>"), "&lt;b&gt;x&lt;/b&gt;");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transforms {
    /// 通知書の段落と増減内訳書のお知らせ文に適用
    pub process_text: fn(&str) -> String,
    /// 増減内訳書の金額とCSVのすべてのセルに適用
    pub format_number: fn(&str) -> String,
}

impl Default for Transforms {
    fn default() -> Self {
        Self {
            process_text,
            format_number,
        }
    }
}
