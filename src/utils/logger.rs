use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(level: Level) -> String {
    match level {
        Level::TRACE => "trace".to_string(),
        Level::DEBUG => "pmm_api_tests=debug,info".to_string(),
        _ => "pmm_api_tests=info,warn".to_string(),
    }
}

/// Installs the global subscriber. Trace level also reports file and line,
/// the way the debug build of the suite is usually read.
///
/// Safe to call more than once: only the first call installs a subscriber,
/// which matters because every test builds its own harness.
pub fn init_logger(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));
    let report_caller = level == Level::TRACE;

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(report_caller)
                .with_thread_ids(false)
                .with_file(report_caller)
                .with_line_number(report_caller)
                .with_test_writer()
                .compact(),
        )
        .try_init();
}
