//! Parser Module
//!
//! 3種類の入力ファイル（通知書XML、増減内訳書XML、CSV）の構造解析。
//! 各パーサーは互いに独立しており、副作用を持ちません。

mod breakdown;
mod notice;
mod tabular;
mod xml;

pub(crate) use breakdown::parse_breakdown;
pub(crate) use notice::parse_notice;
pub(crate) use tabular::parse_tabular;
