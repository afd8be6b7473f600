//! Log a failure and keep propagating it.
//!
//! The diagnostic write goes through an [`ErrorSink`] handed in by the
//! caller, never a process-wide stream. [`TracingSink`] is the default and
//! [`MemorySink`] records entries for inspection.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Destination for logged errors. One call per logged error.
pub trait ErrorSink: Send + Sync {
    fn record(&self, context: Option<&str>, error: &dyn fmt::Display);
}

/// `[context] error`, or just `error` without a context.
pub fn format_entry(context: Option<&str>, error: &dyn fmt::Display) -> String {
    match context {
        Some(context) => format!("[{}] {}", context, error),
        None => error.to_string(),
    }
}

/// Emits each error as a `tracing` event at ERROR level, with the context
/// label as a `context` field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn record(&self, context: Option<&str>, error: &dyn fmt::Display) {
        match context {
            Some(context) => tracing::error!(target: "cchistory", context, "{}", error),
            None => tracing::error!(target: "cchistory", "{}", error),
        }
    }
}

/// Keeps formatted entries in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ErrorSink for MemorySink {
    fn record(&self, context: Option<&str>, error: &dyn fmt::Display) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(format_entry(context, error));
    }
}

/// Record `error` to `sink` once and return it as a failure.
///
/// The returned error is `error` itself, moved rather than copied. An empty
/// context label is treated as no label.
pub fn log_error<T, E: fmt::Display>(
    sink: &dyn ErrorSink,
    error: E,
    context: Option<&str>,
) -> Result<T, E> {
    let context = context.filter(|label| !label.is_empty());
    sink.record(context, &error);
    Err(error)
}

/// Shareable handle pairing [`log_error`] with a fixed sink.
#[derive(Clone)]
pub struct ErrorLogger {
    sink: Arc<dyn ErrorSink>,
}

impl ErrorLogger {
    pub fn new(sink: Arc<dyn ErrorSink>) -> Self {
        Self { sink }
    }

    pub fn log_error<T, E: fmt::Display>(&self, error: E, context: Option<&str>) -> Result<T, E> {
        log_error(self.sink.as_ref(), error, context)
    }

    /// Log the failure of `result`, if any, and return it unchanged.
    pub fn inspect<T, E: fmt::Display>(&self, result: Result<T, E>, context: &str) -> Result<T, E> {
        result.or_else(|error| self.log_error(error, Some(context)))
    }
}

impl Default for ErrorLogger {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl fmt::Debug for ErrorLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorLogger").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn test_log_error_with_context() {
        let sink = MemorySink::new();
        let result: Result<(), AppError> =
            log_error(&sink, AppError::database_connection_failed(), Some("Ctx"));
        assert_eq!(result, Err(AppError::database_connection_failed()));
        assert_eq!(
            sink.entries(),
            vec!["[Ctx] DATABASE_ERROR: Failed to connect to database".to_string()]
        );
    }

    #[test]
    fn test_log_error_without_context() {
        let sink = MemorySink::new();
        let _: Result<(), &str> = log_error(&sink, "plain failure", None);
        let _: Result<(), &str> = log_error(&sink, "empty label", Some(""));
        assert_eq!(sink.entries(), vec!["plain failure".to_string(), "empty label".to_string()]);
    }

    #[test]
    fn test_log_error_returns_same_object() {
        let sink = MemorySink::new();
        let error = Arc::new(AppError::no_search_results());
        let returned: Result<(), Arc<AppError>> = log_error(&sink, Arc::clone(&error), Some("Ctx"));
        assert!(Arc::ptr_eq(&returned.unwrap_err(), &error));
        assert_eq!(sink.entries().len(), 1);
    }

    #[test]
    fn test_logger_inspect_passes_success_through() {
        let sink = Arc::new(MemorySink::new());
        let logger = ErrorLogger::new(sink.clone());
        assert_eq!(logger.inspect(Ok::<_, String>(5), "Ctx"), Ok(5));
        assert!(sink.entries().is_empty());

        assert_eq!(logger.inspect(Err::<i32, _>("bad"), "Ctx"), Err("bad"));
        assert_eq!(sink.entries(), vec!["[Ctx] bad".to_string()]);
    }

    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture_tracing(f: impl FnOnce()) -> String {
        let output = CapturedOutput::default();
        let writer = output.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = output.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_tracing_sink_emits_one_error_event() {
        let output = capture_tracing(|| {
            let _: Result<(), AppError> =
                log_error(&TracingSink, AppError::no_search_results(), Some("search"));
        });

        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("ERROR"));
        assert!(output.contains("VALIDATION_ERROR: No results found"));
        assert!(output.contains("context=\"search\""));
        assert!(!output.contains("[search]"));
    }

    #[test]
    fn test_tracing_sink_without_context() {
        let output = capture_tracing(|| {
            let _: Result<(), &str> = log_error(&TracingSink, "disk full", None);
        });

        assert!(output.contains("disk full"));
        assert!(!output.contains("context="));
    }

    #[test]
    fn test_default_logger_uses_tracing() {
        let output = capture_tracing(|| {
            let _: Result<(), &str> = ErrorLogger::default().inspect(Err("boom"), "load");
        });

        assert!(output.contains("boom"));
        assert!(output.contains("context=\"load\""));
    }
}
