use axum::response::Response;
use serde::{Serialize, Serializer};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;
use std::panic::Location;

pub mod encoder;
pub mod http;
pub mod json;

/// Owned text that may not be valid UTF-8.
///
/// Exception data usually comes from places the renderer does not control
/// (user input echoed into messages, foreign libraries), so the bytes are
/// kept as-is and only checked when they are serialized.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RawText(Vec<u8>);

impl RawText {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RawText {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match std::str::from_utf8(&self.0) {
            Ok(text) => serializer.serialize_str(text),
            Err(e) => Err(serde::ser::Error::custom(format!(
                "malformed UTF-8 at byte {}",
                e.valid_up_to()
            ))),
        }
    }
}

impl fmt::Display for RawText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for RawText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&String::from_utf8_lossy(&self.0), f)
    }
}

impl From<&str> for RawText {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

impl From<String> for RawText {
    fn from(text: String) -> Self {
        Self(text.into_bytes())
    }
}

impl From<&[u8]> for RawText {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for RawText {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// An unhandled application error, as seen by the error renderer.
///
/// `code` is passed through untouched: zero and negative values are valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionInfo {
    pub code: i64,
    pub message: RawText,
    pub file: RawText,
    pub line: u32,
    pub trace: RawText,
}

impl ExceptionInfo {
    /// Create an exception raised at the caller's location.
    ///
    /// The trace is the captured backtrace, or empty when backtraces are
    /// disabled via `RUST_BACKTRACE`.
    #[track_caller]
    pub fn new(code: i64, message: impl Into<RawText>) -> Self {
        let location = Location::caller();
        Self {
            code,
            message: message.into(),
            file: location.file().into(),
            line: location.line(),
            trace: capture_trace(),
        }
    }

    /// Describe an arbitrary error. The trace lists the `source()` chain.
    #[track_caller]
    pub fn from_error(error: &dyn Error) -> Self {
        let location = Location::caller();
        let mut trace = String::new();
        let mut current: Option<&dyn Error> = Some(error);
        let mut depth = 0;
        while let Some(err) = current {
            if depth > 0 {
                trace.push('\n');
            }
            trace.push_str(&format!("#{depth} {err}"));
            current = err.source();
            depth += 1;
        }

        Self {
            code: 0,
            message: error.to_string().into(),
            file: location.file().into(),
            line: location.line(),
            trace: trace.into(),
        }
    }

    pub fn with_file(mut self, file: impl Into<RawText>) -> Self {
        self.file = file.into();
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    pub fn with_trace(mut self, trace: impl Into<RawText>) -> Self {
        self.trace = trace.into();
        self
    }
}

impl fmt::Display for ExceptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl Error for ExceptionInfo {}

fn capture_trace() -> RawText {
    let backtrace = Backtrace::capture();
    match backtrace.status() {
        BacktraceStatus::Captured => backtrace.to_string().into(),
        _ => RawText::default(),
    }
}

/// The ExceptionFilter trait
///
/// Filters handle errors thrown during request processing.
/// They must return a valid Response.
pub trait ExceptionFilter: Send + Sync + 'static {
    /// Catch an exception and return a response
    fn catch(&self, error: Box<dyn Error + Send + Sync>) -> Response;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Refused;

    #[derive(Debug, thiserror::Error)]
    #[error("query failed")]
    struct QueryFailed(#[source] Refused);

    #[test]
    fn test_raw_text_serializes_valid_utf8() {
        let text = RawText::from("héllo \u{1F600}");
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"héllo \u{1F600}\"");
    }

    #[test]
    fn test_raw_text_rejects_malformed_utf8() {
        let text = RawText::from(&b"ab\x80cd"[..]);
        let err = serde_json::to_string(&text).unwrap_err();
        assert_eq!(err.to_string(), "malformed UTF-8 at byte 2");
        assert_eq!(text.to_string(), "ab\u{FFFD}cd");
        assert!(text.as_str().is_none());
    }

    #[test]
    fn test_new_records_caller_location() {
        let exception = ExceptionInfo::new(400, "Test error");
        assert_eq!(exception.code, 400);
        assert_eq!(exception.message.as_str(), Some("Test error"));
        assert_eq!(exception.file.as_str(), Some(file!()));
        assert!(exception.line > 0);
    }

    #[test]
    fn test_from_error_walks_source_chain() {
        let exception = ExceptionInfo::from_error(&QueryFailed(Refused));
        assert_eq!(exception.code, 0);
        assert_eq!(exception.message.as_str(), Some("query failed"));
        assert_eq!(
            exception.trace.as_str(),
            Some("#0 query failed\n#1 connection refused")
        );
    }

    #[test]
    fn test_builders_override_fields() {
        let exception = ExceptionInfo::new(-3, "neg")
            .with_file("app.rs")
            .with_line(10)
            .with_trace("...");
        assert_eq!(exception.code, -3);
        assert_eq!(exception.file.as_str(), Some("app.rs"));
        assert_eq!(exception.line, 10);
        assert_eq!(exception.trace.as_str(), Some("..."));
        assert_eq!(exception.to_string(), "neg (code -3)");
    }
}
