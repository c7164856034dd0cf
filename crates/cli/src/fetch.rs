//! Remote document fetching.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, warn};
use ts_codegen_core::OpenApiDocument;

use crate::error::CliError;

/// Build the one client shared by every remote source.
pub fn build_client(timeout_ms: u64, authorization: Option<&str>) -> Result<reqwest::Client, CliError> {
    let mut headers = HeaderMap::new();
    if let Some(token) = authorization {
        let value = HeaderValue::from_str(token).map_err(|err| CliError::Fetch {
            url: String::new(),
            message: format!("invalid authorization header: {err}"),
        })?;
        headers.insert(AUTHORIZATION, value);
    }

    reqwest::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .default_headers(headers)
        .build()
        .map_err(|err| {
            warn!(error = %err, "Failed to build HTTP client.");
            CliError::Fetch {
                url: String::new(),
                message: format!("failed to build HTTP client: {err}"),
            }
        })
}

/// GET `url` and parse the body as JSON when it looks like an object,
/// otherwise as YAML.
pub async fn fetch_document(client: &reqwest::Client, url: &str) -> Result<OpenApiDocument, CliError> {
    debug!(%url, "Fetching remote document.");
    let fetch_error = |message: String| CliError::Fetch {
        url: url.to_string(),
        message,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| fetch_error(err.to_string()))?;

    let status = response.status();
    debug!(%url, %status, "Received remote document response.");
    if !status.is_success() {
        return Err(fetch_error(format!("server responded with {status}")));
    }

    let body = response
        .text()
        .await
        .map_err(|err| fetch_error(err.to_string()))?;

    let parsed = if body.trim_start().starts_with('{') {
        OpenApiDocument::from_json(&body)
    } else {
        OpenApiDocument::from_yaml(&body)
    };
    parsed.map_err(|source| CliError::Document {
        origin: url.to_string(),
        source,
    })
}
