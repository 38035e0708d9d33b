use std::env;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingSettings;
use crate::output::OutputMode;
use crate::utils;

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Terminal (stderr) plus the optional log file
    Terminal,
    /// Log file only; used while the TUI owns the screen
    FileOnly,
}

fn filter_for(settings: &LoggingSettings, output_mode: OutputMode) -> EnvFilter {
    // SHELVE_LOG wins over the config and verbosity flags
    if let Ok(filter) = env::var("SHELVE_LOG") {
        return EnvFilter::new(filter);
    }
    let level = match output_mode {
        OutputMode::Quiet => "error",
        OutputMode::Verbose => "debug",
        OutputMode::VeryVerbose => "trace",
        OutputMode::Normal => settings.level.as_str(),
    };
    EnvFilter::new(format!("shelve={level}"))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the program.
pub fn init_logger(
    settings: &LoggingSettings,
    output_mode: OutputMode,
    target: LogTarget,
) -> Option<WorkerGuard> {
    let filter_layer = filter_for(settings, output_mode);

    let (file_layer, guard) = match settings.file.as_deref() {
        Some(raw) => {
            let path = utils::expand_home(raw);
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            if let Err(e) = std::fs::create_dir_all(dir) {
                eprintln!("Warning: Failed to create log directory: {}", e);
            }
            let file_name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "shelve.log".into());
            let file_appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (
                Some(fmt::layer().with_writer(non_blocking).with_ansi(false)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let terminal_layer = (target == LogTarget::Terminal).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .with_ansi(true)
    });

    let result = tracing_subscriber::registry()
        .with(terminal_layer)
        .with(file_layer)
        .with(filter_layer)
        .try_init();
    if result.is_err() {
        // Already installed (tests, or a second call); keep the first one
        return guard;
    }

    tracing::debug!("logging initialised");
    guard
}
