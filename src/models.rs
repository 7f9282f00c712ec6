//! Account resources and the JSON envelopes exchanged with the accounts API.

use serde::{Deserialize, Serialize};

/// An account resource.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct AccountData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AccountAttributes>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub organisation_id: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct AccountAttributes {
    /// "Personal" or "Business".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_classification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_matching_opt_out: Option<bool>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub account_number: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_names: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bank_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bank_id_code: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base_currency: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bic: String,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub iban: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joint_account: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secondary_identification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switched: Option<bool>,
}

/// Body of `POST /v1/organisation/accounts/`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CreateAccountRequest {
    pub data: AccountData,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CreateAccountResponse {
    pub data: AccountData,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct FetchAccountResponse {
    pub data: AccountData,
}

/// Identifies the account version to delete. Sent as path and query, not as a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAccountRequest {
    pub id: String,
    pub version: i64,
}
