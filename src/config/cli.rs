use crate::config::settings::DEFAULT_SETTINGS_PATH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "blobmon")]
#[command(about = "Watch, upload, download and delete blobs across Azure storage accounts")]
#[command(version)]
pub struct CliConfig {
    /// Path to the TOML settings file
    #[arg(short, long, global = true, default_value = DEFAULT_SETTINGS_PATH)]
    pub config: PathBuf,

    /// Path to a .env file with connection strings
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Refresh all containers on a timer and print each cycle
    Watch {
        /// Only refresh this account
        #[arg(long)]
        account: Option<String>,
    },
    /// Run a single refresh cycle and print it
    List {
        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show discovered accounts and their containers
    Accounts,
    /// Upload local files next to a listing entry
    Upload {
        #[arg(long)]
        account: String,
        /// Listing entry: container separator, container name or container/path
        #[arg(long)]
        target: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Download blobs into a directory
    Download {
        #[arg(long)]
        account: String,
        #[arg(long, default_value = ".")]
        dest: PathBuf,
        /// Listing entries of the form container/path
        #[arg(required = true)]
        entries: Vec<String>,
    },
    /// Delete blobs
    Delete {
        #[arg(long)]
        account: String,
        #[arg(required = true)]
        entries: Vec<String>,
    },
    /// Change the refresh interval and save it to the settings file
    SetInterval {
        /// New interval in seconds
        #[arg(allow_hyphen_values = true)]
        seconds: String,
    },
}
