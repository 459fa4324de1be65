//! Ariel search endpoints.
//!
//! # What this module handles:
//! - Creating a search (`POST /api/ariel/searches`)
//! - Reading search status (`GET /api/ariel/searches/{search_id}`)
//! - Reading the results envelope (`GET /api/ariel/searches/{search_id}/results`)
//! - Deleting a search (`DELETE /api/ariel/searches/{search_id}`)
//!
//! # What this module does NOT handle:
//! - Polling, retries or cleanup decisions (see [`crate::lifecycle`])
//! - Unwrapping the results envelope (see [`crate::results`])

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use qradar_config::constants::ARIEL_SEARCHES_PATH;

use crate::auth::AuthStrategy;
use crate::endpoints::encode_path_segment;
use crate::endpoints::request::{api_error, error_message, send_request};
use crate::error::{ClientError, Result};
use crate::models::{SearchInfo, SearchJob, SearchStatus};
use crate::redact_query;

#[derive(Debug, Deserialize)]
struct CreateSearchResponse {
    search_id: Option<String>,
    #[serde(default)]
    status: Option<SearchStatus>,
}

fn search_url(base_url: &str, search_id: &str) -> String {
    format!(
        "{}{}/{}",
        base_url,
        ARIEL_SEARCHES_PATH,
        encode_path_segment(search_id)
    )
}

/// Create a new Ariel search.
///
/// Any status other than 201 Created is a [`ClientError::SubmissionFailed`].
pub async fn create_search(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    query: &str,
) -> Result<SearchJob> {
    debug!("Creating Ariel search: {}", redact_query(query));

    let url = format!("{}{}", base_url, ARIEL_SEARCHES_PATH);
    let builder = auth
        .apply(client.post(&url))
        .form(&[("query_expression", query)]);
    let response = send_request(builder, ARIEL_SEARCHES_PATH, "POST").await?;

    if response.status() != StatusCode::CREATED {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response body".to_string());
        return Err(ClientError::SubmissionFailed {
            status,
            message: error_message(body),
        });
    }

    let submitted_at = Utc::now();
    let body: CreateSearchResponse = response.json().await.map_err(|e| {
        ClientError::MalformedResponse(format!("Failed to parse search creation response: {e}"))
    })?;

    let search_id = body
        .search_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ClientError::MalformedResponse("Missing search_id in response".into()))?;

    Ok(SearchJob {
        search_id,
        status: body.status.unwrap_or(SearchStatus::Wait),
        submitted_at,
    })
}

/// Get the status of a search.
pub async fn get_search(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    search_id: &str,
) -> Result<SearchInfo> {
    debug!("Getting status for search: {}", search_id);

    let url = search_url(base_url, search_id);
    let builder = auth.apply(client.get(&url));
    let response = send_request(builder, "/api/ariel/searches/{search_id}", "GET").await?;

    if !response.status().is_success() {
        return Err(api_error(response).await);
    }

    response.json::<SearchInfo>().await.map_err(|e| {
        ClientError::MalformedResponse(format!("Failed to parse search status: {e}"))
    })
}

/// Get the raw results envelope of a completed search.
///
/// Only 200 OK is accepted; anything else becomes an `ApiError` so the
/// caller can apply its retry policy.
pub async fn get_results(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    search_id: &str,
) -> Result<serde_json::Value> {
    debug!("Getting results for search: {}", search_id);

    let url = format!("{}/results", search_url(base_url, search_id));
    let builder = auth.apply(client.get(&url));
    let response =
        send_request(builder, "/api/ariel/searches/{search_id}/results", "GET").await?;

    if response.status() != StatusCode::OK {
        return Err(api_error(response).await);
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        ClientError::MalformedResponse(format!("Failed to parse search results response: {e}"))
    })
}

/// Delete a search and its stored results.
pub async fn delete_search(
    client: &Client,
    base_url: &str,
    auth: &AuthStrategy,
    search_id: &str,
) -> Result<()> {
    debug!("Deleting search: {}", search_id);

    let url = search_url(base_url, search_id);
    let builder = auth.apply(client.delete(&url));
    let response = send_request(builder, "/api/ariel/searches/{search_id}", "DELETE").await?;

    if !response.status().is_success() {
        return Err(api_error(response).await);
    }

    Ok(())
}
