use crate::core::{Account, AccountListing, ContainerListing, ListingEntry};
use crate::utils::error::{BlobMonError, Result};
use futures::StreamExt;

/// Lists one container into display rows.
///
/// The result always starts with the separator row. It is followed by one
/// row per blob, a single empty placeholder, or a single error marker. A
/// failure never escapes this function.
pub async fn list_container(account: &Account, container: &str) -> ContainerListing {
    tracing::debug!(account = %account.name, container, "Listing container");

    let mut entries = vec![ListingEntry::Separator {
        container: container.to_string(),
    }];

    match collect_blob_names(account, container).await {
        Ok(names) if names.is_empty() => {
            tracing::debug!(account = %account.name, container, "Container has no blobs");
            entries.push(ListingEntry::Empty {
                container: container.to_string(),
            });
        }
        Ok(names) => {
            entries.extend(names.into_iter().map(|name| ListingEntry::Blob {
                container: container.to_string(),
                name,
            }));
        }
        Err(e) => {
            let message = e.into_message();
            let err = BlobMonError::ContainerList {
                container: container.to_string(),
                message: message.clone(),
            };
            tracing::error!(account = %account.name, "{}", err);
            entries.push(ListingEntry::Error {
                container: container.to_string(),
                message,
            });
        }
    }

    ContainerListing {
        container: container.to_string(),
        entries,
    }
}

async fn collect_blob_names(account: &Account, container: &str) -> Result<Vec<String>> {
    let mut stream = account.client.list_blobs(container);
    let mut names = Vec::new();
    while let Some(name) = stream.next().await {
        names.push(name?);
    }
    Ok(names)
}

/// Lists every container of an account, in configured order.
pub async fn list_account(account: &Account) -> AccountListing {
    let mut containers = Vec::with_capacity(account.containers.len());
    for container in &account.containers {
        containers.push(list_container(account, container).await);
    }

    AccountListing {
        account: account.name.clone(),
        containers,
    }
}
