use crate::domain::ports::BlobProvider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub const SEPARATOR_MARKER: &str = "=====";
pub const ERROR_MARKER: &str = "[error]";
pub const EMPTY_SUFFIX: &str = ": no blobs";

/// One configured storage account. Built once by discovery and never
/// mutated afterwards.
#[derive(Clone)]
pub struct Account {
    pub index: usize,
    pub name: String,
    pub client: Arc<dyn BlobProvider>,
    pub containers: Vec<String>,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("index", &self.index)
            .field("name", &self.name)
            .field("containers", &self.containers)
            .finish_non_exhaustive()
    }
}

/// A single display row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListingEntry {
    Separator { container: String },
    Blob { container: String, name: String },
    Empty { container: String },
    Error { container: String, message: String },
}

impl ListingEntry {
    pub fn is_blob(&self) -> bool {
        matches!(self, ListingEntry::Blob { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ListingEntry::Error { .. })
    }
}

impl fmt::Display for ListingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingEntry::Separator { container } => {
                write!(f, "{m} container: {c} {m}", m = SEPARATOR_MARKER, c = container)
            }
            ListingEntry::Blob { container, name } => write!(f, "{}/{}", container, name),
            ListingEntry::Empty { container } => write!(f, "{}{}", container, EMPTY_SUFFIX),
            ListingEntry::Error { container, message } => write!(
                f,
                "{} failed to access container: {}, message: {}",
                ERROR_MARKER, container, message
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerListing {
    pub container: String,
    pub entries: Vec<ListingEntry>,
}

impl ContainerListing {
    pub fn blob_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_blob()).count()
    }

    pub fn is_error(&self) -> bool {
        self.entries.iter().any(ListingEntry::is_error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountListing {
    pub account: String,
    pub containers: Vec<ContainerListing>,
}

impl AccountListing {
    pub fn entries(&self) -> impl Iterator<Item = &ListingEntry> {
        self.containers.iter().flat_map(|c| c.entries.iter())
    }
}

/// Everything the display needs for one refresh cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshReport {
    pub cycle: u64,
    pub started_at: DateTime<Utc>,
    pub next_refresh_in_secs: u64,
    pub accounts: Vec<AccountListing>,
}

/// Where an upload lands: a container plus an optional directory prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub container: String,
    pub prefix: String,
}

impl UploadTarget {
    pub fn blob_name_for(&self, file_name: &str) -> String {
        if self.prefix.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", self.prefix, file_name)
        }
    }
}

/// A concrete blob selected from the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRef {
    pub container: String,
    pub path: String,
}

impl fmt::Display for BlobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container, self.path)
    }
}
