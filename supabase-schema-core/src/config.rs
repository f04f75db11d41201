//! Export configuration.
//!
//! Built once at program entry and passed by reference into the fetcher and
//! the export pipeline.

use std::path::{Path, PathBuf};
use url::Url;
use zeroize::Zeroizing;

use crate::Result;
use crate::error::{ExportError, redact_service_url};

/// Output directory used when none is given
pub const DEFAULT_OUTPUT_DIR: &str = ".cursor";

/// Service role key held in zeroizing storage.
///
/// # Security
/// The key is cleared from memory on drop and never printed by `Debug`.
#[derive(Clone)]
pub struct ServiceKey(Zeroizing<String>);

impl ServiceKey {
    /// Wraps a key value.
    pub fn new(key: String) -> Self {
        Self(Zeroizing::new(key))
    }

    /// Exposes the key for building request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the key is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ServiceKey(****)")
    }
}

/// Validated settings for one export run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    service_url: Url,
    service_key: ServiceKey,
    output_dir: PathBuf,
}

impl ExportConfig {
    /// Validates and builds a configuration.
    ///
    /// # Errors
    /// Returns a configuration error if the URL does not parse, is not
    /// `http`/`https`, or the key is blank.
    ///
    /// # Example
    /// ```rust
    /// use supabase_schema_core::ExportConfig;
    ///
    /// let config = ExportConfig::new(
    ///     "https://abc.supabase.co",
    ///     "service-role-key".to_string(),
    ///     ".cursor",
    /// )
    /// .expect("valid config");
    /// assert_eq!(config.output_dir().to_str(), Some(".cursor"));
    /// assert!(!format!("{:?}", config).contains("service-role-key"));
    /// ```
    pub fn new(url: &str, key: String, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let service_url = Url::parse(url.trim()).map_err(|e| {
            ExportError::configuration(format!(
                "Invalid service URL '{}': {}",
                redact_service_url(url),
                e
            ))
        })?;

        if !matches!(service_url.scheme(), "http" | "https") {
            return Err(ExportError::configuration(format!(
                "Service URL must use http or https, got '{}'",
                service_url.scheme()
            )));
        }

        let service_key = ServiceKey::new(key);
        if service_key.is_blank() {
            return Err(ExportError::configuration("Service key cannot be empty"));
        }

        let output_dir = output_dir.into();
        if output_dir.as_os_str().is_empty() {
            return Err(ExportError::configuration(
                "Output directory cannot be empty",
            ));
        }

        Ok(Self {
            service_url,
            service_key,
            output_dir,
        })
    }

    /// The project base URL.
    pub fn service_url(&self) -> &Url {
        &self.service_url
    }

    /// The project base URL with credentials and query removed.
    pub fn redacted_url(&self) -> String {
        redact_service_url(self.service_url.as_str())
    }

    /// The service role key.
    pub fn service_key(&self) -> &ServiceKey {
        &self.service_key
    }

    /// Directory the export files are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
