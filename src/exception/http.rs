use crate::config::ErrorSettings;
use crate::exception::encoder::{Encoder, SerdeJsonEncoder};
use crate::exception::json::JsonErrorRenderer;
use crate::exception::{ExceptionFilter, ExceptionInfo};
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::error::Error;
use std::sync::Arc;

/// An exception filter that answers every error with a JSON body
///
/// Errors that are already an [`ExceptionInfo`] keep their code; anything
/// else is described with [`ExceptionInfo::from_error`] (code 0).
pub struct JsonExceptionFilter<E = SerdeJsonEncoder> {
    renderer: Arc<JsonErrorRenderer<E>>,
    settings: ErrorSettings,
}

impl<E: Encoder> JsonExceptionFilter<E> {
    pub fn new(renderer: Arc<JsonErrorRenderer<E>>, settings: ErrorSettings) -> Self {
        Self { renderer, settings }
    }
}

impl<E: Encoder> ExceptionFilter for JsonExceptionFilter<E> {
    fn catch(&self, error: Box<dyn Error + Send + Sync>) -> Response {
        let exception = match error.downcast::<ExceptionInfo>() {
            Ok(exception) => *exception,
            Err(other) => ExceptionInfo::from_error(&*other),
        };

        let body = self
            .renderer
            .render(&exception, self.settings.display_error_details);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BASE_PATH_KEY, ConfigService, DISPLAY_ERROR_DETAILS_KEY};
    use crate::logging::{ErrorLogger, LogEntry};
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingLogger(AtomicUsize);

    impl ErrorLogger for CountingLogger {
        fn error(&self, _: LogEntry<'_>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Something broke")]
    struct Broken;

    fn filter(display_error_details: &str) -> (Arc<CountingLogger>, JsonExceptionFilter) {
        let config = ConfigService::from_pairs([
            (BASE_PATH_KEY, "/api"),
            (DISPLAY_ERROR_DETAILS_KEY, display_error_details),
        ]);
        let settings = ErrorSettings::from_config(&config).unwrap();
        let logger = Arc::new(CountingLogger::default());
        let renderer = JsonErrorRenderer::new(logger.clone(), Arc::new(config));
        (
            logger,
            JsonExceptionFilter::new(Arc::new(renderer), settings),
        )
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_exception_keeps_its_code() {
        let (logger, filter) = filter("true");

        let response = filter.catch(Box::new(ExceptionInfo::new(400, "Test error")));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let data = body_json(response).await;
        assert_eq!(data["message"], "Test error");
        assert_eq!(data["code"], 400);
        assert_eq!(data["basepath"], "/api");
        assert!(data.get("trace").is_some());
        assert_eq!(logger.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_foreign_error_without_details() {
        let (logger, filter) = filter("false");

        let data = body_json(filter.catch(Box::new(Broken))).await;

        assert_eq!(data["debug"], false);
        assert_eq!(data["code"], 0);
        assert_eq!(data["message"], "Something broke");
        assert!(data.get("file").is_none());
        assert!(data.get("line").is_none());
        assert!(data.get("trace").is_none());
        assert_eq!(logger.0.load(Ordering::SeqCst), 1);
    }
}
