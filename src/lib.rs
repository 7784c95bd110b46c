//! egov-viewer - Offline viewer for documents downloaded from e-Gov
//!
//! This crate loads a directory or a `.zip` archive of e-Gov electronic
//! application results, classifies each file, and renders everything into a
//! single self-contained HTML page.
//!
//! Three kinds of files are recognized:
//!
//! - **Notice XML** (`*.xml`): official notices with a `DOC` root element
//! - **Breakdown statement XML** (`*.xml` whose name contains `増減内訳書`):
//!   insurance premium change breakdowns with a `ZougenUchiwakeSho` root element
//! - **CSV** (`*.csv`): tabular attachments, Shift-JIS encoded by default
//!
//! Anything else is ignored. A malformed XML file is dropped from the page and
//! reported through [`ParseReport`]; a malformed CSV file still appears as an
//! empty table.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use egov_viewer::ViewerBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let viewer = ViewerBuilder::new().build()?;
//!
//!     // Directory or zip archive
//!     let summary = viewer.convert_to_file("downloads/result.zip", "output.html")?;
//!     println!("{} notices, {} tables", summary.notices, summary.tables);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use egov_viewer::{CsvEncoding, OutputFormat, SecurityConfig, ViewerBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let viewer = ViewerBuilder::new()
//!         .with_output_format(OutputFormat::Json)
//!         .with_csv_encoding(CsvEncoding::Auto)
//!         .with_security_config(SecurityConfig {
//!             max_file_count: 500,
//!             ..SecurityConfig::default()
//!         })
//!         .build()?;
//!
//!     let json = viewer.convert_to_string("downloads/result")?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Classification
//!
//! ```rust
//! use egov_viewer::{classify, FileKind};
//!
//! assert_eq!(classify("通知書.xml"), FileKind::Notice);
//! assert_eq!(classify("増減内訳書_2024.xml"), FileKind::BreakdownStatement);
//! assert_eq!(classify("data.csv"), FileKind::Tabular);
//! assert_eq!(classify("readme.txt"), FileKind::Unrecognized);
//! ```

mod aggregate;
mod api;
mod builder;
mod classify;
mod encoding;
mod error;
pub mod logger;
mod output;
mod parser;
mod security;
mod source;
mod types;

// 公開API
pub use aggregate::Aggregator;
pub use api::{CsvEncoding, FileKind, InputKind, OutputFormat};
pub use builder::{Viewer, ViewerBuilder};
pub use classify::{classify, BREAKDOWN_MARKER};
pub use encoding::{decode_csv, normalize_shift_jis};
pub use error::{Result, ViewerError};
pub use output::{
    escape_html, format_number, process_text, HtmlFormatter, JsonFormatter, OutputFormatter,
    Transforms,
};
pub use security::SecurityConfig;
pub use source::{detect_input_kind, load_source};
pub use types::{
    AppendixEntry, Author, BreakdownHeader, BreakdownStatement, ConversionSummary,
    NoticeDocument, ParseReport, PersonRow, PremiumAmounts, RawFileSet, RenderModel, SkippedFile,
    StandardCompensation, SummaryRow, TabularData,
};
