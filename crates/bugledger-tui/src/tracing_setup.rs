use std::path::PathBuf;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{self, FilterExt, LevelFilter};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "info,bugledger_tui=debug,bugledger_store=debug,hyper_util=error,reqwest=warn,rpc_json=trace";

pub struct LoggingGuards {
    /// Guard for the main app log
    pub main: WorkerGuard,
    /// Guard for the raw JSON-RPC traffic log
    pub rpc: WorkerGuard,
}

/// Directory the rolling log files are written to.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bugledger")
        .join("logs")
}

/// The terminal belongs to the UI, so everything goes to files.
pub fn init_tracing() -> std::io::Result<LoggingGuards> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "bugledger.log");
    let (non_blocking_file, main_guard) = tracing_appender::non_blocking(file_appender);

    let main_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(false)
        .with_writer(non_blocking_file);

    // Separate rolling file for request/response bodies exchanged with the node
    let rpc_appender = tracing_appender::rolling::daily(&log_dir, "rpc.log");
    let (rpc_non_blocking, rpc_guard) = tracing_appender::non_blocking(rpc_appender);

    let rpc_layer = fmt::layer()
        .with_writer(rpc_non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    // Only events tagged with target="rpc_json" reach rpc.log
    let only_rpc_json =
        filter::filter_fn(|meta| meta.target() == "rpc_json").and(LevelFilter::TRACE);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(main_layer.with_filter(filter::filter_fn(|meta| meta.target() != "rpc_json")))
        .with(rpc_layer.with_filter(only_rpc_json))
        .try_init();

    Ok(LoggingGuards {
        main: main_guard,
        rpc: rpc_guard,
    })
}

/// Console-only subscriber for tests. Safe to call from every test.
pub fn init_tracing_tests(level: Level) {
    let env_filter = format!("{level},hyper_util=error,reqwest=warn");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&env_filter));

    let console_subscriber = fmt::layer()
        .with_target(true)
        .with_level(true)
        .without_time()
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_test_writer();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_subscriber)
        .try_init();
}
