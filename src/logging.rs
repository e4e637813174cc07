use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// stderrへのロガーを初期化する。stdoutはMCPの通信路なので使わない。
/// `RUST_LOG` があればそれを優先する。
pub fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "bookshelf_mcp=debug,info"
    } else {
        "bookshelf_mcp=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false)
                .compact(),
        )
        .init();
}
