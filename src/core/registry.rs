use crate::config::env::connection_var_name;
use crate::config::settings::Settings;
use crate::core::{Account, ProviderConnector};
use crate::utils::error::{BlobMonError, Result};

/// Builds the account list from numbered connection-string variables.
///
/// Scanning starts at index 1 and stops at the first missing variable.
/// An account that fails to connect or to list its containers is logged and
/// skipped; later indices are still scanned.
pub async fn discover_accounts<F>(
    settings: &Settings,
    connector: &dyn ProviderConnector,
    lookup: F,
) -> Vec<Account>
where
    F: Fn(&str) -> Option<String>,
{
    let prefix = settings.connection_prefix();
    let mut accounts = Vec::new();
    let mut index = 1;

    while let Some(connection_string) = lookup(&connection_var_name(prefix, index)) {
        match init_account(index, &connection_string, settings, connector).await {
            Ok(account) => {
                tracing::debug!(
                    "Account {} ({}) initialized with containers {:?}",
                    account.index,
                    account.name,
                    account.containers
                );
                accounts.push(account);
            }
            Err(e) => {
                tracing::error!("❌ {}", e);
            }
        }
        index += 1;
    }

    tracing::info!(
        "Discovered {} account(s) from {} connection string(s)",
        accounts.len(),
        index - 1
    );
    accounts
}

async fn init_account(
    index: usize,
    connection_string: &str,
    settings: &Settings,
    connector: &dyn ProviderConnector,
) -> Result<Account> {
    let account_init = |e: BlobMonError| BlobMonError::AccountInit {
        index,
        message: e.to_string(),
    };

    let client = connector.connect(connection_string).map_err(account_init)?;

    let containers = match settings.containers_for(index) {
        Some(configured) if !configured.is_empty() => configured,
        _ => client.list_containers().await.map_err(account_init)?,
    };

    Ok(Account {
        index,
        name: client.account_name().to_string(),
        client,
        containers,
    })
}

/// Finds an account by name.
pub fn find_account<'a>(accounts: &'a [Account], name: &str) -> Result<&'a Account> {
    accounts
        .iter()
        .find(|account| account.name == name)
        .ok_or_else(|| BlobMonError::ConfigError {
            message: format!("No discovered account named '{}'", name),
        })
}
