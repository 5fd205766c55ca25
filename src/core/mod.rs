pub mod listing;
pub mod refresh;
pub mod registry;
pub mod target;
pub mod transfer;

pub use crate::domain::model::{
    Account, AccountListing, BlobRef, ContainerListing, ListingEntry, RefreshReport, UploadTarget,
};
pub use crate::domain::ports::{BlobNameStream, BlobProvider, ProviderConnector};
pub use crate::utils::error::Result;
