//! Transport abstraction for the accounts API.
//!
//! A transport performs exactly one network call per method and returns an
//! already classified [`AccountError`] on failure. Retrying is the caller's job.

use async_trait::async_trait;

use crate::error::AccountError;
use crate::models::{
    CreateAccountRequest, CreateAccountResponse, DeleteAccountRequest, FetchAccountResponse,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn create(
        &self,
        request: &CreateAccountRequest,
    ) -> Result<CreateAccountResponse, AccountError>;

    async fn fetch(&self, account_id: &str) -> Result<FetchAccountResponse, AccountError>;

    async fn delete(&self, request: &DeleteAccountRequest) -> Result<(), AccountError>;
}
