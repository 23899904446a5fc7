//! Shared HTTP plumbing for remote providers

use crate::LlmError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Build a client with a per-request timeout
pub(crate) fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
}

/// POST a JSON body and decode a JSON response, retrying transient failures
///
/// Transport errors, 429 and 5xx responses are retried with exponential
/// backoff (1s, 2s, 4s, ...). 404 maps to `ModelNotAvailable`, 401/403 to
/// `Authentication`; other 4xx fail immediately.
pub(crate) async fn post_json_with_retry<B, R>(
    client: &reqwest::Client,
    url: &str,
    body: &B,
    bearer: Option<&str>,
    model: &str,
    max_retries: u32,
) -> Result<R, LlmError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let max_retries = max_retries.max(1);
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < max_retries {
        let mut builder = client.post(url).json(body);
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        match builder.send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return response.json::<R>().await.map_err(|e| {
                        LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                    });
                }

                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match status {
                    StatusCode::NOT_FOUND => {
                        return Err(LlmError::ModelNotAvailable(model.to_string()));
                    }
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                        return Err(LlmError::Authentication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                    StatusCode::TOO_MANY_REQUESTS => {
                        last_error = Some(LlmError::RateLimitExceeded);
                    }
                    s if s.is_server_error() => {
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                    _ => {
                        return Err(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
            }
            Err(e) => {
                last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
            }
        }

        attempts += 1;
        if attempts < max_retries {
            // Exponential backoff: 1s, 2s, 4s, etc.
            let delay = Duration::from_secs(2u64.pow(attempts - 1));
            debug!("Retrying {} in {:?} (attempt {}/{})", url, delay, attempts + 1, max_retries);
            tokio::time::sleep(delay).await;
        }
    }

    Err(last_error.unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
}
