use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, LoggingConfig};

/// Build the filter: `RUST_LOG` wins, then the configured level, then `info`.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Build the `fmt` subscriber for `config`, writing through `writer`.
fn build_subscriber<W>(config: &LoggingConfig, writer: W) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = fmt()
        .with_env_filter(env_filter(&config.level))
        .with_target(true)
        .with_writer(writer);

    match config.format {
        LogFormat::Pretty => Box::new(builder.pretty().finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
        LogFormat::Json => Box::new(builder.json().finish()),
    }
}

/// Install the global `tracing` subscriber. Logs go to stderr; stdout carries
/// command output only.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logging(config: &LoggingConfig) {
    if let Err(e) = build_subscriber(config, std::io::stderr).try_init() {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

    impl CapturedWriter {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedWriter {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_env_filter_falls_back_on_bad_level() {
        temp_env::with_var_unset("RUST_LOG", || {
            assert_eq!(env_filter("debug").to_string(), "debug");
            assert_eq!(env_filter("area_calculator=loud").to_string(), "info");
        });
    }

    #[test]
    fn test_rust_log_wins() {
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            assert_eq!(env_filter("trace").to_string(), "warn");
        });
    }

    #[test]
    fn test_events_go_to_the_configured_writer() {
        let writer = CapturedWriter::default();
        let config = LoggingConfig {
            format: LogFormat::Json,
            ..LoggingConfig::default()
        };

        temp_env::with_var_unset("RUST_LOG", || {
            let subscriber = build_subscriber(&config, writer.clone());
            tracing::subscriber::with_default(subscriber, || {
                tracing::info!(count = 2, "Calculating the area for multiple shapes");
                tracing::debug!("filtered out at info");
            });
        });

        let output = writer.contents();
        assert!(output.contains("Calculating the area for multiple shapes"));
        assert!(output.contains("\"count\":2"));
        assert!(!output.contains("filtered out at info"));
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        let config = LoggingConfig {
            format: LogFormat::Compact,
            ..LoggingConfig::default()
        };
        init_logging(&config);
        init_logging(&config);
    }
}
