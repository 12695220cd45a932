use crate::error::{RendererError, Result};
use dashmap::DashMap;
use std::env;
use std::ffi::OsString;
use std::sync::Arc;

/// Path prefix the application is mounted under, e.g. `/api`.
pub const BASE_PATH_KEY: &str = "APP_BASE_PATH";

/// Whether error bodies include file, line and trace.
pub const DISPLAY_ERROR_DETAILS_KEY: &str = "DISPLAY_ERROR_DETAILS";

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Load every process environment variable.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn new() -> Self {
        Self::from_os_vars(env::vars_os())
    }

    fn from_os_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        let service = Self::default();
        for (key, value) in vars {
            match (key.to_str(), value.to_str()) {
                (Some(key), Some(value)) => service.set(key, value),
                _ => tracing::warn!(key = ?key, "skipping non UTF-8 environment variable"),
            }
        }
        service
    }

    /// Build a service from explicit pairs, ignoring the environment.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let service = Self::default();
        for (key, value) in pairs {
            service.set(key, value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };

        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(RendererError::invalid_setting(key, raw)),
        }
    }
}

/// Error-handling policy read from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorSettings {
    pub display_error_details: bool,
}

impl ErrorSettings {
    pub fn from_config(config: &ConfigService) -> Result<Self> {
        Ok(Self {
            display_error_details: config
                .get_bool(DISPLAY_ERROR_DETAILS_KEY)?
                .unwrap_or_default(),
        })
    }
}

/// Capability to report the application's URL path prefix.
///
/// `None` and an empty string are equivalent for rendering purposes.
pub trait BasePathProvider: Send + Sync {
    fn base_path(&self) -> Option<String>;
}

impl BasePathProvider for ConfigService {
    fn base_path(&self) -> Option<String> {
        self.get(BASE_PATH_KEY)
    }
}

impl<F> BasePathProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn base_path(&self) -> Option<String> {
        self()
    }
}

/// A base path fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticBasePath(String);

impl StaticBasePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }
}

impl BasePathProvider for StaticBasePath {
    fn base_path(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
