//! # json-error-renderer
//!
//! Renders unhandled application errors as JSON response bodies for axum
//! services, with a fallback chain that always yields valid JSON.
//!
//! ## Features
//!
//! - **Fallback chain**: full document, then a minimal document, then a
//!   hardcoded literal that needs no encoder at all
//! - **Debug details**: `file`, `line` and `trace` only when asked for
//! - **Injected collaborators**: bring your own [`ErrorLogger`] and
//!   [`BasePathProvider`], or use [`TracingLogger`] and [`ConfigService`]
//! - **Exception filter**: [`JsonExceptionFilter`] turns boxed errors into
//!   `application/json` responses
//!
//! ## Quick Start
//!
//! ```rust
//! use json_error_renderer::prelude::*;
//!
//! let config = ConfigService::from_pairs([("APP_BASE_PATH", "/api")]);
//! let settings = ErrorSettings::from_config(&config).unwrap();
//!
//! let renderer = JsonErrorRenderer::new(Arc::new(TracingLogger), Arc::new(config));
//! let body = renderer.render(
//!     &ExceptionInfo::new(404, "Not found"),
//!     settings.display_error_details,
//! );
//!
//! assert!(body.starts_with(r#"{"debug":false,"code":404"#));
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod exception;
pub mod logging;

// Re-export core types
pub use config::{BasePathProvider, ConfigService, ErrorSettings, StaticBasePath};
pub use error::{RendererError, Result};
pub use exception::encoder::{Encoder, SerdeJsonEncoder};
pub use exception::http::JsonExceptionFilter;
pub use exception::json::JsonErrorRenderer;
pub use exception::{ExceptionFilter, ExceptionInfo, RawText};
pub use logging::{ErrorLogger, LogEntry, TracingLogger};

pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use json_error_renderer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::{FallbackDocument, ResponseDocument};
    pub use crate::config::{BasePathProvider, ConfigService, ErrorSettings, StaticBasePath};
    pub use crate::error::{RendererError, Result};
    pub use crate::exception::encoder::{Encoder, SerdeJsonEncoder};
    pub use crate::exception::http::JsonExceptionFilter;
    pub use crate::exception::json::JsonErrorRenderer;
    pub use crate::exception::{ExceptionFilter, ExceptionInfo, RawText};
    pub use crate::logging::{ErrorLogger, LogEntry, TracingLogger};
    pub use std::sync::Arc;
}
