// Adapters layer: concrete storage providers behind the domain ports.

pub mod azure;

pub use azure::{AzureBlobProvider, AzureConnector};
