use crate::app::display::format_report;
use crate::config::SettingsStore;
use crate::core::refresh::{RefreshHandle, RefreshLoop};
use crate::core::Account;
use crate::utils::error::{BlobMonError, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// A line typed into a running `watch` session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    Interval(String),
    RefreshNow,
    Focus(Option<String>),
    Help,
    Quit,
}

pub const WATCH_HELP: &str = "commands: interval <seconds> | now | focus <account> | focus all | help | quit";

pub fn parse_watch_command(line: &str) -> Option<WatchCommand> {
    let mut parts = line.split_whitespace();
    let command = parts.next()?;
    let arg = parts.next();

    match (command.to_lowercase().as_str(), arg) {
        ("interval", Some(value)) => Some(WatchCommand::Interval(value.to_string())),
        ("interval", None) => Some(WatchCommand::Interval(String::new())),
        ("now" | "refresh", _) => Some(WatchCommand::RefreshNow),
        ("focus", None) | ("focus", Some("all")) => Some(WatchCommand::Focus(None)),
        ("focus", Some(name)) => Some(WatchCommand::Focus(Some(name.to_string()))),
        ("help" | "?", _) => Some(WatchCommand::Help),
        ("quit" | "exit" | "q", _) => Some(WatchCommand::Quit),
        _ => None,
    }
}

/// Display side of the monitor.
///
/// Owns the settings, renders every report the refresh task publishes, and
/// applies commands read from stdin. Nothing else touches the listing.
pub struct WatchSession {
    store: SettingsStore,
    accounts: Arc<Vec<Account>>,
    handle: RefreshHandle,
}

impl WatchSession {
    /// Applies one command. Returns `false` when the session should end.
    pub fn apply(&mut self, command: WatchCommand) -> bool {
        match command {
            WatchCommand::Interval(raw) => match self.store.set_refresh_interval(&raw) {
                Ok(interval) => {
                    println!("refresh_interval updated to {} seconds (applies after the next refresh)", interval)
                }
                Err(e @ BlobMonError::InvalidInterval { .. }) => {
                    println!("❌ {} ({})", e.user_friendly_message(), e.recovery_suggestion())
                }
                Err(e) => println!("⚠️ interval applied but not saved: {}", e),
            },
            WatchCommand::RefreshNow => self.handle.refresh_now(),
            WatchCommand::Focus(None) => {
                self.handle.set_focus(None);
                println!("Showing all accounts");
                self.handle.refresh_now();
            }
            WatchCommand::Focus(Some(name)) => {
                if self.accounts.iter().any(|a| a.name == name) {
                    println!("Showing only account {}", name);
                    self.handle.set_focus(Some(name));
                    self.handle.refresh_now();
                } else {
                    println!("❌ unknown account '{}'", name);
                }
            }
            WatchCommand::Help => println!("{}", WATCH_HELP),
            WatchCommand::Quit => return false,
        }
        true
    }
}

pub async fn run_watch(
    store: SettingsStore,
    accounts: Arc<Vec<Account>>,
    focus: Option<String>,
) -> Result<()> {
    if let Some(name) = &focus {
        crate::core::registry::find_account(&accounts, name)?;
    }

    let (refresh_loop, handle, mut reports) =
        RefreshLoop::new(Arc::clone(&accounts), store.subscribe_interval());
    handle.set_focus(focus);
    let _refresh_task = refresh_loop.spawn();

    let mut session = WatchSession {
        store,
        accounts,
        handle,
    };

    println!("{}", WATCH_HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            report = reports.recv() => match report {
                Some(report) => print!("{}", format_report(&report)),
                None => break,
            },
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => match parse_watch_command(&line) {
                    Some(command) => {
                        if !session.apply(command) {
                            break;
                        }
                    }
                    None => println!("unknown command: {} ({})", line.trim(), WATCH_HELP),
                },
                None => {
                    tracing::debug!("stdin closed, watching without commands");
                    stdin_open = false;
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    tracing::info!("Watch session ended");
    Ok(())
}
