use crate::utils::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use std::sync::Arc;

/// Lazily produced blob names for one container.
pub type BlobNameStream = BoxStream<'static, Result<String>>;

/// Capabilities the monitor needs from a storage account.
///
/// Implementations convert their own SDK errors into
/// [`BlobMonError::Provider`](crate::utils::error::BlobMonError::Provider);
/// callers decide how a failure is reported.
#[async_trait]
pub trait BlobProvider: Send + Sync {
    fn account_name(&self) -> &str;

    async fn list_containers(&self) -> Result<Vec<String>>;

    /// Starts listing a container. Items are fetched as the stream is polled.
    fn list_blobs(&self, container: &str) -> BlobNameStream;

    async fn upload_blob(
        &self,
        container: &str,
        name: &str,
        data: Bytes,
        overwrite: bool,
    ) -> Result<()>;

    async fn download_blob(&self, container: &str, path: &str) -> Result<Vec<u8>>;

    async fn delete_blob(&self, container: &str, path: &str) -> Result<()>;
}

/// Builds a provider from a connection string.
pub trait ProviderConnector: Send + Sync {
    fn connect(&self, connection_string: &str) -> Result<Arc<dyn BlobProvider>>;
}
