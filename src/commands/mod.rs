use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::io::Write;
use std::path::Path;

use crate::{
    client::AccountClient,
    models::AccountData,
    retry::Backoff,
    transport::Transport,
};

/// Account JSON accepted by `create`: either the bare resource or the API envelope.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum AccountInput {
    Envelope { data: AccountData },
    Bare(AccountData),
}

impl AccountInput {
    fn into_account(self) -> AccountData {
        match self {
            AccountInput::Envelope { data } => data,
            AccountInput::Bare(data) => data,
        }
    }
}

/// Parses account JSON, bare or wrapped in `{"data": ...}`.
pub fn parse_account(json: &str) -> Result<AccountData> {
    let input: AccountInput =
        serde_json::from_str(json).context("Failed to parse account JSON")?;
    Ok(input.into_account())
}

/// Reads account JSON from `source`, or from stdin when `source` is `-`.
pub fn read_account(source: &Path) -> Result<AccountData> {
    let json = if source == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("Failed to read account from stdin")?
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read account from {:?}", source))?
    };
    parse_account(&json)
}

pub fn write_account<W: Write>(out: &mut W, account: &AccountData) -> Result<()> {
    let json = serde_json::to_string_pretty(account)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

#[tracing::instrument(skip(client, account))]
pub async fn create<T: Transport, B: Backoff + Clone>(
    client: &AccountClient<T, B>,
    account: &AccountData,
) -> Result<AccountData> {
    info!("Creating account {}...", account.id);
    let created = client
        .create(account)
        .await
        .with_context(|| format!("Failed to create account {}", account.id))?;
    info!("Account {} created.", created.id);
    Ok(created)
}

#[tracing::instrument(skip(client))]
pub async fn fetch<T: Transport, B: Backoff + Clone>(
    client: &AccountClient<T, B>,
    account_id: &str,
) -> Result<AccountData> {
    client
        .fetch(account_id)
        .await
        .with_context(|| format!("Failed to fetch account {}", account_id))
}

#[tracing::instrument(skip(client))]
pub async fn delete<T: Transport, B: Backoff + Clone>(
    client: &AccountClient<T, B>,
    account_id: &str,
    version: i64,
) -> Result<()> {
    info!("Deleting account {} (version {})...", account_id, version);
    client
        .delete(account_id, version)
        .await
        .with_context(|| format!("Failed to delete account {}", account_id))?;
    info!("Account {} deleted.", account_id);
    Ok(())
}
