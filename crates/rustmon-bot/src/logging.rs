//! Structured logging setup.

use crate::error::{BotError, BotResult};
use rustmon_config::LoggingConfig;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str =
    "rustmon=info,rustmon_bot=info,rustmon_status=info,rustmon_commands=info,rustmon_config=info";

/// File name prefix of the daily rolling log files.
pub const LOG_FILE_PREFIX: &str = "rustmon.log";

/// `RUST_LOG` when set, otherwise [`DEFAULT_LOG_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Plain subscriber for the work done before the configured one exists.
///
/// Config loading runs under this one, so notices like a missing config file
/// still reach the console.
pub fn startup_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
       .with_writer(writer).finish()
}

/// Installs the global tracing subscriber.
///
/// Keep the returned guard alive for the lifetime of the process, otherwise
/// buffered file output is lost.
pub fn init_logging(config: &LoggingConfig) -> BotResult<Option<WorkerGuard>> {
    let mut layers = vec![env_filter().boxed()];
    if config.json {
        layers.push(fmt::layer().json().boxed());
    } else {
        layers.push(fmt::layer().boxed());
    }

    let guard = config.directory.as_ref().map(|directory| {
        let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(fmt::layer().with_ansi(false).with_writer(writer).boxed());
        guard
    });

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| BotError::Logging(e.to_string()))?;

    Ok(guard)
}
