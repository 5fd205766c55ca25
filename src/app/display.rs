use crate::core::transfer::TransferReport;
use crate::core::{Account, RefreshReport};
use std::fmt::Write;

/// Renders one refresh cycle. Each account block replaces whatever the
/// previous cycle showed for it.
pub fn format_report(report: &RefreshReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "── cycle {} at {} (next refresh in {}s) ──",
        report.cycle,
        report.started_at.format("%Y-%m-%d %H:%M:%S"),
        report.next_refresh_in_secs
    );

    if report.accounts.is_empty() {
        let _ = writeln!(out, "(no accounts)");
    }

    for account in &report.accounts {
        let _ = writeln!(out, "Account: {}", account.account);
        for entry in account.entries() {
            let _ = writeln!(out, "  {}", entry);
        }
    }
    out
}

pub fn format_accounts(accounts: &[Account]) -> String {
    let mut out = String::new();
    if accounts.is_empty() {
        let _ = writeln!(out, "No accounts discovered");
        return out;
    }
    for account in accounts {
        let _ = writeln!(out, "[{}] {}", account.index, account.name);
        for container in &account.containers {
            let _ = writeln!(out, "    {}", container);
        }
    }
    out
}

pub fn format_transfer_report(report: &TransferReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} succeeded, {} failed, {} skipped",
        report.operation,
        report.succeeded.len(),
        report.failed.len(),
        report.skipped.len()
    );
    for (item, err) in &report.failed {
        let _ = writeln!(out, "  ❌ {}: {}", item, err.user_friendly_message());
    }
    out
}
