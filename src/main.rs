use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use egov_viewer::{logger, CsvEncoding, OutputFormat, ViewerBuilder};

#[derive(Debug, Parser)]
#[command(name = "govkit")]
#[command(about = "Tools for documents downloaded from e-Gov")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render notices, breakdown statements and CSV files into one HTML page
    EgovViewer(ViewerArgs),
}

#[derive(Debug, clap::Args)]
struct ViewerArgs {
    /// Directory or .zip archive downloaded from e-Gov
    path: PathBuf,

    #[arg(long, short, default_value = "output.html")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = FormatArg::Html)]
    format: FormatArg,

    #[arg(long, value_enum, default_value_t = EncodingArg::ShiftJis)]
    csv_encoding: EncodingArg,

    #[arg(
        long,
        short,
        help = "Enable verbose output (RUST_LOG, when set, overrides the log filter)"
    )]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Html,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EncodingArg {
    ShiftJis,
    #[value(name = "utf-8")]
    Utf8,
    Auto,
}

impl From<EncodingArg> for CsvEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::ShiftJis => CsvEncoding::ShiftJis,
            EncodingArg::Utf8 => CsvEncoding::Utf8,
            EncodingArg::Auto => CsvEncoding::Auto,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::EgovViewer(args) => run_viewer(args),
    }
}

fn run_viewer(args: ViewerArgs) -> ExitCode {
    logger::init_cli_logger(args.verbose);
    tracing::debug!("CLI args: {:?}", args);

    let viewer = match ViewerBuilder::new()
        .with_output_format(args.format.into())
        .with_csv_encoding(args.csv_encoding.into())
        .build()
    {
        Ok(viewer) => viewer,
        Err(e) => {
            eprintln!("エラー: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match viewer.convert_to_file(&args.path, &args.output) {
        Ok(summary) => {
            let skipped = summary.report.skipped_count();
            if skipped > 0 {
                eprintln!("解析できなかったファイルを {} 件スキップしました", skipped);
            }
            let kind = match args.format {
                FormatArg::Html => "HTML",
                FormatArg::Json => "JSON",
            };
            println!("{} ファイルを生成しました: {}", kind, args.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Conversion failed: {}", e);
            eprintln!("エラー: {}", e);
            ExitCode::FAILURE
        }
    }
}
