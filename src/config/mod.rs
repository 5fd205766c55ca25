#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod settings;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use settings::{Settings, SettingsStore};
