//! Breakdown Statement Parser
//!
//! 保険料増減内訳書（`ZougenUchiwakeSho`）のXMLを[`BreakdownStatement`]に変換する。

use crate::error::{Result, ViewerError};
use crate::parser::xml::XmlElement;
use crate::types::{
    BreakdownHeader, BreakdownStatement, PersonRow, PremiumAmounts, StandardCompensation,
    SummaryRow,
};

/// 増減内訳書XMLのルート要素名
const ROOT: &str = "ZougenUchiwakeSho";

/// 増減内訳書XMLを解析する
///
/// ルート要素が`ZougenUchiwakeSho`でない場合はエラーです。
/// 個人別内訳（`kojinbetsuUchiwake`）と集計（`shukei`）は出現順に並びます。
pub(crate) fn parse_breakdown(content: &[u8]) -> Result<BreakdownStatement> {
    let root = XmlElement::parse(content)?;
    if root.name != ROOT {
        return Err(ViewerError::Xml(format!(
            "expected root element <{}>, found <{}>",
            ROOT, root.name
        )));
    }

    let header = root.child("header").map(parse_header).unwrap_or_default();

    let person_rows = root
        .children_named("kojinbetsuUchiwake")
        .map(|row| PersonRow {
            name: row.child_text("shimei"),
            process_date: row.child_text("shoriYMD"),
            notice_form_code: row.child_text("todokeshoCode"),
            standard_compensation: standard_compensation(row),
            health_insurance: premium(row, "kenKouHokenRyou"),
            pension_insurance: premium(row, "kouseiNenkinHokenRyou"),
        })
        .collect();

    let summary_rows = root
        .children_named("shukei")
        .map(|row| SummaryRow {
            label: row.child_text("goukei"),
            standard_compensation: standard_compensation(row),
            health_insurance: premium(row, "kenKouHokenRyou"),
            pension_insurance: premium(row, "kouseiNenkinHokenRyou"),
        })
        .collect();

    Ok(BreakdownStatement {
        header,
        person_rows,
        summary_rows,
    })
}

fn parse_header(header: &XmlElement) -> BreakdownHeader {
    BreakdownHeader {
        employer_name: header.child_text("jigyoshoName"),
        employer_number: header.child_text("jigyoshoNum"),
        registration_code: header.child_text("jigyoshoSeiriKigo"),
        staff_count: header.child_text("jinInNum"),
        pension_office: header.child_text("nenkinJimusho2"),
        target_month: header.child_text("nouhuMokutekiMonth"),
        target_year: header.child_text("nouhuMokutekiYear"),
        target_era: header.child_text("nouhuMokutekiYearGengou"),
        notice: header.child_text("oshirase"),
    }
}

fn standard_compensation(row: &XmlElement) -> StandardCompensation {
    row.child("hyoujyunHoushuuGetsuGakuNew")
        .map(|e| StandardCompensation {
            amount: e.child_text("getsuGakuKenpo"),
            effective_date: e.child_text("hasseiYMD"),
        })
        .unwrap_or_default()
}

fn premium(row: &XmlElement, name: &str) -> PremiumAmounts {
    row.child(name)
        .map(|e| PremiumAmounts {
            this_month: e.child_text("hongetsuGaku"),
            prior_months: e.child_text("zengetsuIzenKingaku"),
        })
        .unwrap_or_default()
}
