use anyhow::Context;
use blobmon::app::display::{format_accounts, format_report, format_transfer_report};
use blobmon::app::watch::run_watch;
use blobmon::config::env::{load_dotenv, lookup_connection_string};
use blobmon::core::refresh::refresh_all;
use blobmon::core::registry::find_account;
use blobmon::core::target::resolve_target;
use blobmon::core::transfer::{delete_blobs, download_blobs, upload_files, TransferReport};
use blobmon::core::RefreshReport;
use blobmon::utils::error::ErrorSeverity;
use blobmon::utils::logger;
use blobmon::{discover_accounts, AzureConnector, CliConfig, Command, SettingsStore};
use chrono::Utc;
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // The settings file is required; nothing runs without it
    let store = match SettingsStore::load(&config.config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(config.verbose, store.settings().log_level());
    tracing::info!("Starting blobmon v{}", env!("CARGO_PKG_VERSION"));

    load_dotenv(config.env_file.as_deref()).context("loading .env file")?;

    if let Err(e) = run(config.command, store).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 2,
            ErrorSeverity::Medium => 3,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 1,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(command: Command, mut store: SettingsStore) -> blobmon::Result<()> {
    if let Command::SetInterval { seconds } = &command {
        let interval = store.set_refresh_interval(seconds)?;
        println!(
            "✅ refresh_interval set to {} seconds in {}",
            interval,
            store.path().display()
        );
        return Ok(());
    }

    let accounts = discover_accounts(store.settings(), &AzureConnector, lookup_connection_string).await;

    match command {
        Command::Watch { account } => run_watch(store, Arc::new(accounts), account).await,
        Command::List { json } => {
            let report = RefreshReport {
                cycle: 1,
                started_at: Utc::now(),
                next_refresh_in_secs: store.refresh_interval(),
                accounts: refresh_all(&accounts, None).await,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", format_report(&report));
            }
            Ok(())
        }
        Command::Accounts => {
            print!("{}", format_accounts(&accounts));
            Ok(())
        }
        Command::Upload {
            account,
            target,
            files,
        } => {
            let account = find_account(&accounts, &account)?;
            let target = resolve_target(&target)?;
            finish(upload_files(account, &target, &files).await)
        }
        Command::Download {
            account,
            dest,
            entries,
        } => {
            let account = find_account(&accounts, &account)?;
            tokio::fs::create_dir_all(&dest).await?;
            finish(download_blobs(account, &entries, &dest).await)
        }
        Command::Delete { account, entries } => {
            let account = find_account(&accounts, &account)?;
            finish(delete_blobs(account, &entries).await)
        }
        Command::SetInterval { .. } => Ok(()),
    }
}

fn finish(report: TransferReport) -> blobmon::Result<()> {
    print!("{}", format_transfer_report(&report));
    if !report.is_success() {
        // Every item was attempted; exit non-zero so scripts notice failures
        std::process::exit(3);
    }
    Ok(())
}
