//! JSON error rendering with a fallback chain.
//!
//! [`JsonErrorRenderer::render`] always returns a well-formed JSON string:
//!
//! 1. the full [`ResponseDocument`] (details included in debug mode);
//! 2. if that cannot be encoded, a [`FallbackDocument`] carrying the
//!    encoder's error description and code 500;
//! 3. if that cannot be encoded either, a literal built by hand that never
//!    touches the encoder.

use crate::common::{FallbackDocument, ResponseDocument};
use crate::config::BasePathProvider;
use crate::error::{RendererError, Result};
use crate::exception::ExceptionInfo;
use crate::exception::encoder::{Encoder, SerdeJsonEncoder};
use crate::logging::{ErrorLogger, LogEntry};
use std::sync::Arc;

const HARDCODED_PREFIX: &str = r#"{"message":"Error rendering error","code":500,"basepath":""#;
const HARDCODED_SUFFIX: &str = r#""}"#;

/// Renders unhandled exceptions as JSON response bodies.
///
/// Stateless apart from its collaborators, so one instance can be shared
/// across threads and requests.
///
/// # Example
/// ```
/// use json_error_renderer::config::StaticBasePath;
/// use json_error_renderer::exception::ExceptionInfo;
/// use json_error_renderer::exception::json::JsonErrorRenderer;
/// use json_error_renderer::logging::TracingLogger;
/// use std::sync::Arc;
///
/// let renderer = JsonErrorRenderer::new(
///     Arc::new(TracingLogger),
///     Arc::new(StaticBasePath::new("/api")),
/// );
/// let body = renderer.render(&ExceptionInfo::new(400, "Test error"), false);
/// assert_eq!(
///     body,
///     r#"{"debug":false,"code":400,"message":"Test error","basepath":"/api"}"#
/// );
/// ```
pub struct JsonErrorRenderer<E = SerdeJsonEncoder> {
    logger: Arc<dyn ErrorLogger>,
    base_path: Arc<dyn BasePathProvider>,
    encoder: E,
}

impl JsonErrorRenderer<SerdeJsonEncoder> {
    pub fn new(logger: Arc<dyn ErrorLogger>, base_path: Arc<dyn BasePathProvider>) -> Self {
        Self {
            logger,
            base_path,
            encoder: SerdeJsonEncoder,
        }
    }
}

impl<E: Encoder> JsonErrorRenderer<E> {
    /// Swap the encoder, keeping the collaborators.
    pub fn with_encoder<E2: Encoder>(self, encoder: E2) -> JsonErrorRenderer<E2> {
        JsonErrorRenderer {
            logger: self.logger,
            base_path: self.base_path,
            encoder,
        }
    }

    /// Render `exception` as a JSON body. Never fails.
    pub fn render(&self, exception: &ExceptionInfo, debug: bool) -> String {
        self.logger.error(LogEntry::Exception(exception));

        let basepath = self.base_path.base_path().unwrap_or_default();

        self.try_primary(exception, debug, &basepath)
            .or_else(|err| {
                tracing::debug!(error = %err, "falling back to minimal error document");
                self.logger.error(LogEntry::Message(&format!("Error rendering exception: {err}")));
                self.try_fallback(&err, &basepath)
            })
            .unwrap_or_else(|err| {
                tracing::debug!(error = %err, "falling back to hardcoded error document");
                self.logger.error(LogEntry::Message(&format!(
                    "Error rendering fallback error: {err}"
                )));
                hardcoded_fallback(&basepath)
            })
    }

    fn try_primary(
        &self,
        exception: &ExceptionInfo,
        debug: bool,
        basepath: &str,
    ) -> Result<String> {
        let document = ResponseDocument::new(exception, debug, basepath);
        self.encoder
            .encode_document(&document)
            .map_err(RendererError::Encoding)
    }

    fn try_fallback(&self, reason: &RendererError, basepath: &str) -> Result<String> {
        let document = FallbackDocument::new(reason, basepath);
        self.encoder
            .encode_fallback(&document)
            .map_err(RendererError::SecondaryEncoding)
    }
}

/// Last-resort body. Built by concatenation so it cannot fail.
///
/// Only `"` and `\` are escaped, so `basepath` must not contain control
/// characters or the result is not valid JSON.
pub fn hardcoded_fallback(basepath: &str) -> String {
    let escaped = escape_basepath(basepath);
    let mut body = String::with_capacity(HARDCODED_PREFIX.len() + escaped.len() + 2);
    body.push_str(HARDCODED_PREFIX);
    body.push_str(&escaped);
    body.push_str(HARDCODED_SUFFIX);
    body
}

/// Prefix every `"` and `\` with a backslash.
pub fn escape_basepath(basepath: &str) -> String {
    let mut escaped = String::with_capacity(basepath.len());
    for c in basepath.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
