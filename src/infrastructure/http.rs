use std::time::Duration;

use reqwest::Url;

use crate::domain::errors::LookupError;

/// Parses a service base URL so path segments can be appended to it.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, LookupError> {
    let url = Url::parse(raw).map_err(|e| LookupError::InvalidEndpoint(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(LookupError::InvalidEndpoint(raw.to_string()));
    }
    Ok(url)
}

pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client, LookupError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LookupError::InvalidEndpoint(e.to_string()))
}

pub(crate) fn unavailable(e: reqwest::Error) -> LookupError {
    LookupError::Unavailable(e.to_string())
}
