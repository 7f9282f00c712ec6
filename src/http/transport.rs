//! reqwest-backed [`Transport`] for the accounts API.

use async_trait::async_trait;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use super::classify::check_response;
use crate::error::AccountError;
use crate::models::{
    CreateAccountRequest, CreateAccountResponse, DeleteAccountRequest, FetchAccountResponse,
};
use crate::transport::Transport;

/// Path of the accounts collection below the API base URL.
pub const DEFAULT_BASE_PATH: &str = "/v1/organisation/accounts/";

const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

/// HTTP transport. One call per method, no retries.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    base_path: String,
}

impl HttpTransport {
    /// Creates a transport for the API at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, self.base_path)
    }

    /// Appends `account_id` as a single, percent-encoded path segment.
    fn resource_url(&self, account_id: &str) -> Result<Url, AccountError> {
        let invalid = || AccountError::bad_request("failed to create HTTP request");
        let mut url = Url::parse(&self.collection_url()).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push(account_id);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AccountError> {
        let response = request.send().await.map_err(|e| {
            if e.is_builder() {
                AccountError::bad_request("failed to create HTTP request")
            } else {
                AccountError::permanent(format!("failed to send HTTP request: {}", e))
            }
        })?;

        check_response(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AccountError> {
        response
            .json::<T>()
            .await
            .map_err(|_| AccountError::permanent("failed to unmarshal response body"))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[tracing::instrument(skip(self, request))]
    async fn create(
        &self,
        request: &CreateAccountRequest,
    ) -> Result<CreateAccountResponse, AccountError> {
        let url = self.collection_url();
        debug!("Creating account {} at {}...", request.data.id, url);

        let body = serde_json::to_vec(request)
            .map_err(|_| AccountError::bad_request("failed to marshal request body"))?;

        let response = self
            .send(
                self.client
                    .post(&url)
                    .header(CONTENT_TYPE, JSON_API_CONTENT_TYPE)
                    .body(body),
            )
            .await?;

        Self::decode(response).await
    }

    #[tracing::instrument(skip(self))]
    async fn fetch(&self, account_id: &str) -> Result<FetchAccountResponse, AccountError> {
        let url = self.resource_url(account_id)?;
        debug!("Fetching account from {}...", url);

        let response = self.send(self.client.get(url)).await?;

        Self::decode(response).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, request: &DeleteAccountRequest) -> Result<(), AccountError> {
        let url = self.resource_url(&request.id)?;
        debug!("Deleting account version {} at {}...", request.version, url);

        self.send(
            self.client
                .delete(url)
                .query(&[("version", request.version)]),
        )
        .await?;

        Ok(())
    }
}
