use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use tempfile::tempdir;

const ACCOUNT_ID: &str = "ad27e265-9605-4b4b-a0e5-3003ea9cc4dc";

fn account_json(version: i64) -> String {
    format!(
        r#"{{
            "data": {{
                "id": "{}",
                "organisation_id": "eb0bd6f5-c3f5-44b2-b677-acd23cdde73c",
                "type": "accounts",
                "version": {},
                "attributes": {{
                    "country": "GB",
                    "base_currency": "GBP",
                    "bank_id": "400300",
                    "bank_id_code": "GBDSC",
                    "bic": "NWBKGB22",
                    "name": ["John Smith"]
                }}
            }}
        }}"#,
        ACCOUNT_ID, version
    )
}

fn cli(url: &str) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("form3-accounts"));
    cmd.env_remove("ACCOUNTAPI_BASE_URL")
        .arg("--base-url")
        .arg(url)
        .arg("--log-level")
        .arg("off");
    cmd
}

#[test]
fn test_create_from_file() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("POST", "/v1/organisation/accounts/")
        .match_header("content-type", "application/vnd.api+json")
        .match_body(Matcher::PartialJsonString(format!(
            r#"{{"data": {{"id": "{}"}}}}"#,
            ACCOUNT_ID
        )))
        .with_status(201)
        .with_header("content-type", "application/vnd.api+json")
        .with_body(account_json(0))
        .create();

    let dir = tempdir().unwrap();
    let file = dir.path().join("account.json");
    std::fs::write(&file, account_json(0)).unwrap();

    cli(&url)
        .arg("create")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(ACCOUNT_ID))
        .stdout(predicate::str::contains(r#""version": 0"#));

    mock.assert();
}

#[test]
fn test_create_from_stdin() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("POST", "/v1/organisation/accounts/")
        .with_status(201)
        .with_body(account_json(0))
        .create();

    cli(&url)
        .arg("create")
        .arg("-")
        .write_stdin(format!(r#"{{"id": "{}", "type": "accounts"}}"#, ACCOUNT_ID))
        .assert()
        .success()
        .stdout(predicate::str::contains(ACCOUNT_ID));

    mock.assert();
}

#[test]
fn test_fetch_prints_account() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("GET", format!("/v1/organisation/accounts/{}", ACCOUNT_ID).as_str())
        .with_status(200)
        .with_body(account_json(2))
        .create();

    cli(&url)
        .arg("fetch")
        .arg(ACCOUNT_ID)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""bank_id": "400300""#))
        .stdout(predicate::str::contains(r#""version": 2"#));

    mock.assert();
}

#[test]
fn test_fetch_retries_server_errors() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("GET", "/v1/organisation/accounts/abc")
        .with_status(500)
        .with_body(r#"{"message": "internal server error"}"#)
        .expect(3)
        .create();

    cli(&url)
        .arg("--retries")
        .arg("2")
        .arg("--initial-delay-ms")
        .arg("1")
        .arg("fetch")
        .arg("abc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch account abc"))
        .stderr(predicate::str::contains("internal server error"));

    mock.assert();
}

#[test]
fn test_fetch_not_found() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("GET", "/v1/organisation/accounts/123456")
        .with_status(404)
        .with_body(r#"{"message": "123456"}"#)
        .expect(2)
        .create();

    cli(&url)
        .arg("--retries")
        .arg("1")
        .arg("fetch")
        .arg("123456")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "resource not found with ID: 123456",
        ));

    mock.assert();
}

#[test]
fn test_undecodable_error_is_not_retried() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("GET", "/v1/organisation/accounts/abc")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .expect(1)
        .create();

    cli(&url)
        .arg("fetch")
        .arg("abc")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "permanent failure: failed to unmarshal API error",
        ));

    mock.assert();
}

#[test]
fn test_delete_with_version() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock(
            "DELETE",
            format!("/v1/organisation/accounts/{}?version=1", ACCOUNT_ID).as_str(),
        )
        .with_status(204)
        .create();

    cli(&url)
        .arg("delete")
        .arg(ACCOUNT_ID)
        .arg("--version")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    mock.assert();
}

#[test]
fn test_create_with_missing_file_fails() {
    let dir = tempdir().unwrap();

    cli("http://127.0.0.1:1")
        .arg("create")
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read account"));
}
