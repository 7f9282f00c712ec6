use anyhow::Result;
use clap::Parser;
use form3_accounts::{AccountClient, Options, commands};
use log::{LevelFilter, warn};
use std::path::PathBuf;
use std::time::Duration;

/// form3-accounts - accounts API client
///
/// Create, fetch and delete account records. Failed calls are retried with
/// exponential backoff; zero-valued retry settings fall back to the defaults.
///
/// Examples:
///   form3-accounts create account.json
///   form3-accounts fetch ad27e265-9605-4b4b-a0e5-3003ea9cc4dc
///   form3-accounts delete ad27e265-9605-4b4b-a0e5-3003ea9cc4dc --version 0
#[derive(Parser, Debug)]
#[command(author, version = env!("FORM3_ACCOUNTS_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Accounts API base URL
    #[arg(
        long = "base-url",
        env = "ACCOUNTAPI_BASE_URL",
        value_name = "URL",
        default_value = form3_accounts::config::DEFAULT_BASE_URL,
        global = true
    )]
    base_url: String,

    /// Largest single backoff delay in milliseconds (0 = 5 minutes)
    #[arg(long = "max-elapsed-ms", value_name = "MS", default_value_t = 0, global = true)]
    max_elapsed_ms: u64,

    /// Retries after the first attempt (0 = 5)
    #[arg(long, value_name = "N", default_value_t = 0, global = true)]
    retries: u32,

    /// Delay before the first retry in milliseconds
    #[arg(long = "initial-delay-ms", value_name = "MS", default_value_t = 0, global = true)]
    initial_delay_ms: u64,

    /// Backoff growth factor (0 = 2)
    #[arg(long, default_value_t = 0.0, global = true)]
    multiplier: f64,

    /// Relative jitter applied to each delay (0 = 0.1)
    #[arg(long = "random-factor", default_value_t = 0.0, global = true)]
    random_factor: f64,

    /// Log level: off, error, warn, info, debug
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LevelFilter,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            base_url: self.base_url.clone(),
            max_elapsed_time: Duration::from_millis(self.max_elapsed_ms),
            max_retries: self.retries,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            multiplier: self.multiplier,
            random_factor: self.random_factor,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Create an account from a JSON file ("-" reads stdin)
    Create(CreateArgs),

    /// Fetch an account and print it as JSON
    Fetch(FetchArgs),

    /// Delete a version of an account
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Account JSON, bare or wrapped in {"data": ...}
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct FetchArgs {
    #[arg(value_name = "ACCOUNT_ID")]
    pub account_id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    #[arg(value_name = "ACCOUNT_ID")]
    pub account_id: String,

    /// Account version to delete
    #[arg(long, default_value_t = 0)]
    pub version: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level.to_string()),
    )
    .init();

    let client = AccountClient::new(&cli.options())?;

    let cancel = client.cancellation_token().clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling...");
            cancel.cancel();
        }
    });

    let mut stdout = std::io::stdout();
    match cli.command {
        Commands::Create(args) => {
            let account = commands::read_account(&args.file)?;
            let created = commands::create(&client, &account).await?;
            commands::write_account(&mut stdout, &created)?;
        }
        Commands::Fetch(args) => {
            let account = commands::fetch(&client, &args.account_id).await?;
            commands::write_account(&mut stdout, &account)?;
        }
        Commands::Delete(args) => {
            commands::delete(&client, &args.account_id, args.version).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_fetch_parsing() {
        let cli = Cli::try_parse_from(["form3-accounts", "fetch", "abc"]).unwrap();
        match cli.command {
            Commands::Fetch(args) => {
                assert_eq!(args.account_id, "abc");
            }
            _ => panic!("Expected Fetch command"),
        }
        assert_eq!(cli.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_cli_delete_parsing() {
        let cli =
            Cli::try_parse_from(["form3-accounts", "delete", "abc", "--version", "3"]).unwrap();
        match cli.command {
            Commands::Delete(args) => {
                assert_eq!(args.account_id, "abc");
                assert_eq!(args.version, 3);
            }
            _ => panic!("Expected Delete command"),
        }
    }

    #[test]
    fn test_cli_delete_default_version() {
        let cli = Cli::try_parse_from(["form3-accounts", "delete", "abc"]).unwrap();
        match cli.command {
            Commands::Delete(args) => assert_eq!(args.version, 0),
            _ => panic!("Expected Delete command"),
        }
    }

    #[test]
    fn test_cli_create_parsing() {
        let cli = Cli::try_parse_from(["form3-accounts", "create", "-"]).unwrap();
        match cli.command {
            Commands::Create(args) => assert_eq!(args.file, PathBuf::from("-")),
            _ => panic!("Expected Create command"),
        }
    }

    #[test]
    fn test_cli_retry_options() {
        let cli = Cli::try_parse_from([
            "form3-accounts",
            "--base-url",
            "http://accountapi:8080",
            "--max-elapsed-ms",
            "180000",
            "--retries",
            "3",
            "--initial-delay-ms",
            "300",
            "--multiplier",
            "2",
            "--random-factor",
            "0.1",
            "--log-level",
            "debug",
            "fetch",
            "abc",
        ])
        .unwrap();

        let options = cli.options();
        assert_eq!(options.base_url, "http://accountapi:8080");
        assert_eq!(options.max_elapsed_time, Duration::from_secs(180));
        assert_eq!(options.max_retries, 3);
        assert_eq!(options.initial_delay, Duration::from_millis(300));
        assert_eq!(options.multiplier, 2.0);
        assert_eq!(options.random_factor, 0.1);
        assert_eq!(cli.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        let result = Cli::try_parse_from(["form3-accounts", "abc"]);
        assert!(result.is_err());
    }
}
