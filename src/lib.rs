pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::{Settings, SettingsStore};

pub use adapters::AzureConnector;
pub use crate::core::refresh::{RefreshHandle, RefreshLoop};
pub use crate::core::registry::discover_accounts;
pub use utils::error::{BlobMonError, Result};
