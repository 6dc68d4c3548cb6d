//! Shared HTTP response helpers for the REST client.
//!
//! Maps non-success responses onto [`StoreError`], pulling the `code` and
//! `message` fields out of the store's JSON error body when present.

use serde::Deserialize;

use crate::error::StoreError;

/// Postgres error codes for NOT NULL and CHECK violations.
const VALIDATION_CODES: [&str; 2] = ["23502", "23514"];

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Return the response unchanged on success, or the mapped error.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(map_error_body(status.as_u16(), &body))
}

fn map_error_body(status: u16, body: &str) -> StoreError {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed.message.unwrap_or_else(|| body.to_string());
    if parsed
        .code
        .as_deref()
        .is_some_and(|code| VALIDATION_CODES.contains(&code))
    {
        return StoreError::Validation(message);
    }
    StoreError::Status { status, message }
}
