//! Accounts API client: create, fetch and delete with automatic retries.

use anyhow::Result;
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::config::Options;
use crate::error::AccountError;
use crate::http::HttpTransport;
use crate::models::{AccountData, CreateAccountRequest, DeleteAccountRequest};
use crate::retry::{Backoff, ExponentialBackoff, retry};
use crate::transport::Transport;

/// Client for the accounts API.
///
/// Every call runs on its own copy of the configured backoff, so retry state
/// never carries over from one call to the next. Cancelling the client's token
/// aborts all calls in flight.
pub struct AccountClient<T = HttpTransport, B = ExponentialBackoff> {
    transport: T,
    backoff: B,
    cancel: CancellationToken,
}

impl AccountClient {
    /// Creates a client talking HTTP to `options.base_url`.
    pub fn new(options: &Options) -> Result<Self> {
        let transport = HttpTransport::new(options.http_client()?, options.base_url.clone());
        Ok(Self::with_parts(transport, options.backoff()))
    }
}

impl<T: Transport, B: Backoff + Clone> AccountClient<T, B> {
    pub fn with_parts(transport: T, backoff: B) -> Self {
        Self {
            transport,
            backoff,
            cancel: CancellationToken::new(),
        }
    }

    /// Uses `cancel` to abort retries instead of the client's own token.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn set_transport(&mut self, transport: T) {
        self.transport = transport;
    }

    pub fn backoff(&self) -> &B {
        &self.backoff
    }

    pub fn set_backoff(&mut self, backoff: B) {
        self.backoff = backoff;
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    #[tracing::instrument(skip(self, account), fields(account_id = %account.id))]
    pub async fn create(&self, account: &AccountData) -> Result<AccountData, AccountError> {
        let request = CreateAccountRequest {
            data: account.clone(),
        };

        let response = self.run(|| self.transport.create(&request)).await?;
        Ok(response.data)
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, account_id: &str) -> Result<AccountData, AccountError> {
        let response = self.run(|| self.transport.fetch(account_id)).await?;
        Ok(response.data)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, account_id: &str, version: i64) -> Result<(), AccountError> {
        let request = DeleteAccountRequest {
            id: account_id.to_string(),
            version,
        };

        self.run(|| self.transport.delete(&request)).await
    }

    async fn run<F, Fut, R>(&self, operation: F) -> Result<R, AccountError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<R, AccountError>>,
    {
        let mut backoff = self.backoff.clone();
        backoff.reset();
        retry(operation, &mut backoff, &self.cancel).await
    }
}
