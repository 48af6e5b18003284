use crate::error::{Result, WareError};
use std::time::Duration;

/// Fetch a remote text resource, failing on any non-success status.
pub fn fetch_text(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| WareError::RemoteFetchError(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| WareError::RemoteFetchError(format!("{}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(WareError::RemoteFetchError(format!(
            "{}: HTTP {}",
            url,
            response.status()
        )));
    }

    response
        .text()
        .map_err(|e| WareError::RemoteFetchError(e.to_string()))
}
