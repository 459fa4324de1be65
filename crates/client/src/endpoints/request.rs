//! Request execution and error-body decoding.
//!
//! Responsibilities:
//! - Send a prepared request and convert transport failures to `ClientError`.
//! - Turn a non-success response into a `ClientError::ApiError`, extracting the
//!   console's error message when the body is a QRadar error document.
//!
//! Does NOT handle:
//! - Retries. A single attempt is made; callers decide whether to try again.

use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Error document returned by the console on failed API calls.
#[derive(Debug, Deserialize)]
struct QRadarErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Sends an HTTP request once.
///
/// # Errors
///
/// Propagates `reqwest` transport errors as `ClientError::HttpError`.
/// The response status is not inspected.
pub async fn send_request(builder: RequestBuilder, endpoint: &str, method: &str) -> Result<Response> {
    let response = builder.send().await.map_err(|e| {
        debug!(endpoint, method, error = %e, "Request failed before a response was received");
        ClientError::from(e)
    })?;
    debug!(
        endpoint,
        method,
        status = response.status().as_u16(),
        "Received response"
    );
    Ok(response)
}

/// Extract a readable message from an error response body.
pub(crate) fn error_message(body: String) -> String {
    match serde_json::from_str::<QRadarErrorBody>(&body) {
        Ok(QRadarErrorBody {
            message: Some(message),
            description,
        }) => match description {
            Some(d) if !d.is_empty() && d != message => format!("{message}: {d}"),
            _ => message,
        },
        Ok(QRadarErrorBody {
            message: None,
            description: Some(d),
        }) => d,
        _ => body,
    }
}

/// Consume a non-success response into a `ClientError::ApiError`.
pub async fn api_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    ClientError::ApiError {
        status,
        url,
        message: error_message(body),
    }
}
