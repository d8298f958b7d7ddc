// ロギング初期化
// RUST_LOG が設定されていればそれを優先し、未設定時はCLIの冗長度から決める

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// `-v` の回数と `--quiet` から既定のフィルタ文字列を決める
pub fn default_filter(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "warn";
    }
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// グローバルsubscriberを初期化
///
/// 標準エラーへ出力し、標準出力はレポート専用にする。二重初期化はエラー。
pub fn init_logging(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("ロギング初期化エラー: {e}"))
}
