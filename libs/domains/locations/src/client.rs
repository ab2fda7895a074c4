use crate::error::{LocationError, LocationResult};
use serde::de::DeserializeOwned;
use tracing::warn;

/// GET `url` and decode the JSON body, turning non-2xx answers into lookup errors.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> LocationResult<T> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| LocationError::Lookup(format!("Request to {} failed: {}", url, e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, url = %url, "Upstream lookup failed");
        return Err(LocationError::Lookup(format!(
            "{} answered {}: {}",
            url, status, body
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| LocationError::Lookup(format!("Invalid response from {}: {}", url, e)))
}
