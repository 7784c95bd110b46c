//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use serde::Serialize;

/// ファイル名から判定される入力ファイルの分類
///
/// 分類は[`classify`](crate::classify)関数だけが決定します。
/// パイプラインの他の箇所で拡張子や部分文字列を再チェックしてはいけません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// 通知書本体のXML（`.xml`で終わり、増減内訳書マーカーを含まない）
    Notice,

    /// 保険料増減内訳書のXML（`.xml`で終わり、`増減内訳書`を含む）
    BreakdownStatement,

    /// CSVファイル（`.csv`で終わる）
    Tabular,

    /// 上記のいずれにも該当しないファイル（PDF、画像など）
    Unrecognized,
}

/// 入力パスの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// ディレクトリ（再帰的に走査する）
    Directory,

    /// ZIPアーカイブ（拡張子`.zip`、大文字小文字は区別しない）
    Archive,
}

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// 単一のHTML文書（デフォルト）
    ///
    /// 通知書、増減内訳書、CSVの順にブロックを出力します。
    #[default]
    Html,

    /// 描画モデルをそのままJSONとして出力
    ///
    /// # 出力例
    ///
    /// ```json
    /// {
    ///   "notices": [],
    ///   "breakdown_statements": [],
    ///   "tables": [
    ///     {"filename": "data.csv", "headers": ["name"], "rows": [["Alice"]]}
    ///   ]
    /// }
    /// ```
    Json,
}

/// CSVファイルの文字コードの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum CsvEncoding {
    /// Shift-JISとしてデコードし、失敗した場合は元のバイト列をそのまま使う（デフォルト）
    #[default]
    ShiftJis,

    /// UTF-8として扱う（不正なバイト列は置換文字になる）
    Utf8,

    /// 有効なUTF-8であればUTF-8、そうでなければShift-JISとして扱う
    Auto,
}
