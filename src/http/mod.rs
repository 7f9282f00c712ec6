//! HTTP transport for the accounts API and response classification.

mod classify;
mod transport;

pub use classify::{check_response, classify_error_body};
pub use transport::{DEFAULT_BASE_PATH, HttpTransport};
