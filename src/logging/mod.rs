use crate::exception::ExceptionInfo;

/// A single error-level record handed to an [`ErrorLogger`].
#[derive(Debug, Clone, Copy)]
pub enum LogEntry<'a> {
    Exception(&'a ExceptionInfo),
    Message(&'a str),
}

/// Capability to record error-level events.
///
/// Loggers cannot fail: whatever happens inside `error` must not stop the
/// renderer from producing a body.
pub trait ErrorLogger: Send + Sync {
    fn error(&self, entry: LogEntry<'_>);
}

impl<F> ErrorLogger for F
where
    F: Fn(LogEntry<'_>) + Send + Sync,
{
    fn error(&self, entry: LogEntry<'_>) {
        self(entry)
    }
}

/// Forwards entries to `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ErrorLogger for TracingLogger {
    fn error(&self, entry: LogEntry<'_>) {
        match entry {
            LogEntry::Exception(exception) => tracing::error!(
                code = exception.code,
                file = %exception.file,
                line = exception.line,
                "{}",
                exception.message
            ),
            LogEntry::Message(message) => tracing::error!("{}", message),
        }
    }
}
