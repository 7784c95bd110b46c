//! Logging
//!
//! CLI用のtracing購読者を初期化する。ログは標準エラー出力に書き込みます。

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// CLI用のロガーを初期化する
///
/// `RUST_LOG`が設定されていればそれを優先します。未設定の場合は
/// `egov_viewer=info`、`verbose`が`true`なら`egov_viewer=debug`になります。
pub fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("egov_viewer=debug,govkit=debug,warn"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("egov_viewer=info,govkit=info,warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
