//! Client library for the accounts API.
//!
//! Create, fetch and delete account records with automatic retries. The retry
//! engine ([`retry`]) drives any [`Transport`]; errors carry an
//! [`ErrorKind`] that decides whether another attempt is made.

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod retry;
pub mod transport;

pub use client::AccountClient;
pub use config::Options;
pub use error::{AccountError, Cancelled, Classify, ErrorKind};
pub use http::HttpTransport;
pub use models::{AccountAttributes, AccountData};
pub use retry::{Backoff, ExponentialBackoff};
pub use transport::Transport;
