//! Classification of HTTP responses into account errors.

use reqwest::{Response, StatusCode};
use serde::Deserialize;

use crate::error::AccountError;

/// Error body returned by the accounts API.
#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    #[serde(default, alias = "error_message")]
    message: String,
}

/// Passes 2xx responses through and turns everything else into an [`AccountError`].
///
/// A body that cannot be read or decoded is a permanent failure: retrying will
/// not make the response parseable.
pub async fn check_response(response: Response) -> Result<Response, AccountError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .bytes()
        .await
        .map_err(|_| AccountError::permanent("failed to read response body"))?;

    Err(classify_error_body(status, &body))
}

/// Maps a non-2xx status and its body to an error.
///
/// 400 becomes `BadRequest`, 404 becomes `NotFound` (the API puts the
/// missing id in `message`), anything else an `Api` error.
pub fn classify_error_body(status: StatusCode, body: &[u8]) -> AccountError {
    let api_error: ApiErrorBody = match serde_json::from_slice(body) {
        Ok(api_error) => api_error,
        Err(_) => return AccountError::permanent("failed to unmarshal API error"),
    };

    match status {
        StatusCode::BAD_REQUEST => AccountError::bad_request(api_error.message),
        StatusCode::NOT_FOUND => AccountError::not_found(api_error.message),
        _ => AccountError::api(status.as_u16(), api_error.message),
    }
}
