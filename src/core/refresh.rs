use crate::core::listing::list_account;
use crate::core::{Account, AccountListing, RefreshReport};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, Notify};
use tokio::task::JoinHandle;

const REPORT_CHANNEL_CAPACITY: usize = 4;

/// Lists every account (or only the focused one) sequentially.
pub async fn refresh_all(accounts: &[Account], focus: Option<&str>) -> Vec<AccountListing> {
    let mut listings = Vec::with_capacity(accounts.len());
    for account in accounts {
        if focus.is_some_and(|name| name != account.name) {
            continue;
        }
        listings.push(list_account(account).await);
    }
    listings
}

/// Control side of a running [`RefreshLoop`], held by the display.
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    trigger: Arc<Notify>,
    focus_tx: Arc<watch::Sender<Option<String>>>,
}

impl RefreshHandle {
    /// Ends the current sleep and starts a cycle right away.
    pub fn refresh_now(&self) {
        self.trigger.notify_one();
    }

    /// Restricts later cycles to one account, or clears the restriction.
    pub fn set_focus(&self, account: Option<String>) {
        self.focus_tx.send_replace(account);
    }

    pub fn focus(&self) -> Option<String> {
        self.focus_tx.borrow().clone()
    }
}

/// Background task that re-lists all containers on a timer.
///
/// Each cycle is published as one [`RefreshReport`]. The interval is read
/// when a cycle finishes, right before the sleep it governs, so a change
/// applies to the next sleep but never to one already in flight. A cycle
/// always runs to completion; the loop ends once the report receiver is
/// dropped.
pub struct RefreshLoop {
    accounts: Arc<Vec<Account>>,
    interval: watch::Receiver<u64>,
    trigger: Arc<Notify>,
    focus: watch::Receiver<Option<String>>,
    reports: mpsc::Sender<RefreshReport>,
    cycle: u64,
}

impl RefreshLoop {
    pub fn new(
        accounts: Arc<Vec<Account>>,
        interval: watch::Receiver<u64>,
    ) -> (Self, RefreshHandle, mpsc::Receiver<RefreshReport>) {
        let (reports, report_rx) = mpsc::channel(REPORT_CHANNEL_CAPACITY);
        let (focus_tx, focus) = watch::channel(None);
        let trigger = Arc::new(Notify::new());

        let handle = RefreshHandle {
            trigger: Arc::clone(&trigger),
            focus_tx: Arc::new(focus_tx),
        };

        let refresh_loop = Self {
            accounts,
            interval,
            trigger,
            focus,
            reports,
            cycle: 0,
        };

        (refresh_loop, handle, report_rx)
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        tracing::info!("🔄 Refresh loop started for {} account(s)", self.accounts.len());

        loop {
            let report = self.refresh_cycle().await;
            let period = report.next_refresh_in_secs;

            if self.reports.send(report).await.is_err() {
                tracing::debug!("Report receiver dropped, stopping refresh loop");
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(period)) => {
                    tracing::debug!("Refresh interval of {}s elapsed", period);
                }
                _ = self.trigger.notified() => {
                    tracing::debug!("Immediate refresh requested");
                }
            }
        }
    }

    async fn refresh_cycle(&mut self) -> RefreshReport {
        self.cycle += 1;
        let started_at = Utc::now();
        let focus = self.focus.borrow().clone();

        tracing::debug!(cycle = self.cycle, focus = ?focus, "Refresh cycle started");
        let accounts = refresh_all(&self.accounts, focus.as_deref()).await;

        let failed = accounts
            .iter()
            .flat_map(|a| a.containers.iter())
            .filter(|c| c.is_error())
            .count();
        if failed > 0 {
            tracing::warn!(cycle = self.cycle, "{} container(s) failed to list", failed);
        }

        RefreshReport {
            cycle: self.cycle,
            started_at,
            // Read after listing so a change made mid-cycle governs this sleep
            next_refresh_in_secs: *self.interval.borrow(),
            accounts,
        }
    }
}
