use crate::common::{FallbackDocument, ResponseDocument};

/// Turns response documents into JSON text.
///
/// Both methods have working defaults built on `serde_json`, which leaves
/// non-ASCII characters unescaped and reports failures as `Err` instead of
/// producing a placeholder value. Override one of them to change how a
/// single tier is encoded.
pub trait Encoder: Send + Sync + 'static {
    /// Encode the full document (first attempt).
    fn encode_document(&self, document: &ResponseDocument<'_>) -> serde_json::Result<String> {
        serde_json::to_string(document)
    }

    /// Encode the minimal fallback document (second attempt).
    fn encode_fallback(&self, document: &FallbackDocument<'_>) -> serde_json::Result<String> {
        serde_json::to_string(document)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonEncoder;

impl Encoder for SerdeJsonEncoder {}
