use crate::exception::{ExceptionInfo, RawText};
use serde::Serialize;

/// Status code reported by both fallback documents.
pub const FALLBACK_CODE: u16 = 500;

/// Full error body
///
/// The `file`, `line` and `trace` keys are only emitted in debug mode.
///
/// # Example
/// ```
/// use json_error_renderer::common::ResponseDocument;
/// use json_error_renderer::exception::ExceptionInfo;
///
/// let exception = ExceptionInfo::new(400, "Test error");
/// let document = ResponseDocument::new(&exception, false, "/api");
/// assert_eq!(
///     serde_json::to_string(&document).unwrap(),
///     r#"{"debug":false,"code":400,"message":"Test error","basepath":"/api"}"#
/// );
/// ```
#[derive(Debug, Serialize)]
pub struct ResponseDocument<'a> {
    pub debug: bool,
    pub code: i64,
    pub message: &'a RawText,
    pub basepath: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<&'a RawText>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<&'a RawText>,
}

impl<'a> ResponseDocument<'a> {
    pub fn new(exception: &'a ExceptionInfo, debug: bool, basepath: &'a str) -> Self {
        let mut document = Self {
            debug,
            code: exception.code,
            message: &exception.message,
            basepath,
            file: None,
            line: None,
            trace: None,
        };

        if debug {
            document.file = Some(&exception.file);
            document.line = Some(exception.line);
            document.trace = Some(&exception.trace);
        }

        document
    }
}

/// Minimal body used when the full document cannot be encoded.
#[derive(Debug, Serialize)]
pub struct FallbackDocument<'a> {
    pub message: String,
    pub code: u16,
    pub basepath: &'a str,
}

impl<'a> FallbackDocument<'a> {
    pub fn new(reason: impl std::fmt::Display, basepath: &'a str) -> Self {
        Self {
            message: format!("Error rendering error: {reason}"),
            code: FALLBACK_CODE,
            basepath,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn exception() -> ExceptionInfo {
        ExceptionInfo::new(400, "Test error")
            .with_file("app.rs")
            .with_line(10)
            .with_trace("...")
    }

    #[test]
    fn test_document_without_debug_omits_details() {
        let exception = exception();
        let document = ResponseDocument::new(&exception, false, "/api");
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(
            value,
            json!({"debug": false, "code": 400, "message": "Test error", "basepath": "/api"})
        );
    }

    #[test]
    fn test_document_with_debug_includes_details() {
        let exception = exception();
        let document = ResponseDocument::new(&exception, true, "/api");
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(
            value,
            json!({
                "debug": true,
                "code": 400,
                "message": "Test error",
                "basepath": "/api",
                "file": "app.rs",
                "line": 10,
                "trace": "...",
            })
        );
    }

    #[test]
    fn test_fallback_document_shape() {
        let document = FallbackDocument::new("boom", "");
        let value: Value = serde_json::to_value(&document).unwrap();

        assert_eq!(
            value,
            json!({"message": "Error rendering error: boom", "code": 500, "basepath": ""})
        );
    }
}
