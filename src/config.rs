use anyhow::Result;
use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::retry::ExponentialBackoff;

/// Where the accounts API listens unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

const USER_AGENT: &str = concat!("form3-accounts/", env!("CARGO_PKG_VERSION"));

/// Client configuration.
///
/// Zero values in the retry parameters fall back to the backoff defaults
/// (5 minutes, 5 retries, no initial delay, multiplier 2, jitter 0.1).
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub base_url: String,
    pub max_elapsed_time: Duration,
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub multiplier: f64,
    pub random_factor: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_elapsed_time: Duration::ZERO,
            max_retries: 0,
            initial_delay: Duration::ZERO,
            multiplier: 0.0,
            random_factor: 0.0,
        }
    }
}

impl Options {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff::new(
            self.max_elapsed_time,
            self.max_retries,
            self.initial_delay,
            self.multiplier,
            self.random_factor,
        )
    }

    pub fn http_client(&self) -> Result<Client> {
        debug!("Building HTTP client for {}", self.base_url);
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(client)
    }
}
