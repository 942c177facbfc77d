//! Process-wide logging setup.
//!
//! One call at process start wires a console layer and a daily-rotated file
//! under `logs/`. The returned guard must be held for the process lifetime
//! so buffered file output is flushed at shutdown.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", "scorecast.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "scorecast=info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .init();

    guard
}
