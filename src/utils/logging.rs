// src/utils/logging.rs
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Level used when `RUST_LOG` is unset. Missing-file warnings and the final
/// summary are the only events a normal run emits at this level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Console subscriber used by the binary, writing through `make_writer`.
pub fn console_subscriber<W>(filter: EnvFilter, make_writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt()
        .with_env_filter(filter)
        .with_writer(make_writer)
        .with_target(false)
        .finish()
}

/// Sets up the logging framework using tracing_subscriber.
/// Reads log level filters from the `RUST_LOG` environment variable,
/// falling back to [`DEFAULT_LOG_LEVEL`]. Output goes to stderr.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    console_subscriber(filter, std::io::stderr).init();

    tracing::debug!("Logging setup complete.");
}

/// Runs `f` with the console subscriber at the default level installed for
/// the current thread and returns everything it logged.
#[cfg(test)]
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = console_subscriber(EnvFilter::new(DEFAULT_LOG_LEVEL), move || writer.clone());

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    (result, logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_hides_debug() {
        let ((), logs) = capture_logs(|| {
            tracing::debug!("per-file detail");
            tracing::warn!("mandala5.txt not found");
            tracing::info!("summary line");
        });

        assert!(!logs.contains("per-file detail"));
        assert_eq!(logs.lines().filter(|l| l.contains("WARN")).count(), 1);
        assert_eq!(logs.lines().filter(|l| l.contains("INFO")).count(), 1);
    }
}
