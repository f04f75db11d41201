//! Schema fetching from a Supabase project.
//!
//! The schema is read through a single PostgREST RPC call to the
//! `get_schema_info` database function, which must be installed in the
//! project and return a JSON array of `{ table, columns }` objects.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::Result;
use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::models::TableDescriptor;

/// Name of the RPC function that returns the schema
pub const SCHEMA_RPC_FUNCTION: &str = "get_schema_info";

/// Source of table and column metadata.
///
/// # Object Safety
/// This trait is object-safe so the pipeline can take `&dyn SchemaFetcher`.
#[async_trait]
pub trait SchemaFetcher: Send + Sync {
    /// Fetches the table list, in upstream order.
    ///
    /// # Errors
    /// Returns [`ExportError::Fetch`] if the call fails or the response is
    /// not a table list. No retry is attempted.
    async fn fetch_schema(&self) -> Result<Vec<TableDescriptor>>;
}

/// Fetcher backed by the PostgREST endpoint of a Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseFetcher {
    client: Client,
    endpoint: Url,
}

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    hint: Option<String>,
}

impl SupabaseFetcher {
    /// Creates a fetcher for the project in `config`.
    ///
    /// The key is sent both as `apikey` and as a bearer token, the way the
    /// Supabase client libraries authenticate service role calls.
    ///
    /// # Errors
    /// Returns a configuration error if the key is not a valid header value
    /// or the HTTP client cannot be built.
    pub fn new(config: &ExportConfig) -> Result<Self> {
        let key = config.service_key().expose();

        let mut api_key = header::HeaderValue::from_str(key)
            .map_err(|_| ExportError::configuration("Service key contains invalid characters"))?;
        api_key.set_sensitive(true);
        let mut bearer = header::HeaderValue::from_str(&format!("Bearer {}", key))
            .map_err(|_| ExportError::configuration("Service key contains invalid characters"))?;
        bearer.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert("apikey", api_key);
        headers.insert(header::AUTHORIZATION, bearer);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("supabase-schema-export/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ExportError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: rpc_endpoint(config.service_url())?,
        })
    }

    /// The RPC URL this fetcher calls.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SchemaFetcher for SupabaseFetcher {
    async fn fetch_schema(&self) -> Result<Vec<TableDescriptor>> {
        debug!("Calling RPC function {}", SCHEMA_RPC_FUNCTION);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| ExportError::fetch(describe_transport_error(e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExportError::fetch(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(ExportError::fetch(error_message(status, &body)));
        }

        let tables: Vec<TableDescriptor> = serde_json::from_str(&body).map_err(|e| {
            ExportError::fetch(format!(
                "Unexpected response from {}: {}",
                SCHEMA_RPC_FUNCTION, e
            ))
        })?;

        info!("Fetched {} tables", tables.len());
        Ok(tables)
    }
}

/// Builds `{base}/rest/v1/rpc/get_schema_info?select=*` from the project URL.
///
/// Any path already on the base URL is kept, so self-hosted deployments
/// behind a path prefix work.
pub fn rpc_endpoint(base: &Url) -> Result<Url> {
    let mut endpoint = base.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);

    endpoint
        .path_segments_mut()
        .map_err(|()| ExportError::configuration("Service URL cannot be used as a base URL"))?
        .pop_if_empty()
        .extend(["rest", "v1", "rpc", SCHEMA_RPC_FUNCTION]);
    endpoint.query_pairs_mut().append_pair("select", "*");

    Ok(endpoint)
}

/// Human-readable message for a non-success response.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(PostgrestError {
            message: Some(message),
            hint,
        }) => match hint {
            Some(hint) if !hint.is_empty() => format!("{} (hint: {})", message, hint),
            _ => message,
        },
        _ => format!("HTTP {}", status),
    }
}

/// Transport errors without the request URL attached.
fn describe_transport_error(error: reqwest::Error) -> String {
    let kind = if error.is_connect() {
        "connection failed"
    } else if error.is_timeout() {
        "request timed out"
    } else {
        "request failed"
    };
    format!("{}: {}", kind, error.without_url())
}
