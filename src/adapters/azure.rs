use crate::domain::ports::{BlobNameStream, BlobProvider, ProviderConnector};
use crate::utils::error::{BlobMonError, Result};
use async_trait::async_trait;
use azure_storage::{CloudLocation, ConnectionString};
use azure_storage_blobs::prelude::{BlobServiceClient, ClientBuilder};
use bytes::Bytes;
use futures::{stream, StreamExt, TryStreamExt};
use std::sync::Arc;
use url::{Host, Url};

const PUBLIC_ENDPOINT_SUFFIX: &str = "core.windows.net";
const EMULATOR_ACCOUNT: &str = "devstoreaccount1";

/// Connects to Azure Blob Storage from connection strings: account key or
/// SAS, public or custom endpoints, and the local storage emulator.
#[derive(Debug, Default, Clone, Copy)]
pub struct AzureConnector;

impl ProviderConnector for AzureConnector {
    fn connect(&self, connection_string: &str) -> Result<Arc<dyn BlobProvider>> {
        Ok(Arc::new(AzureBlobProvider::from_connection_string(
            connection_string,
        )?))
    }
}

/// Where the blob service of a connection string lives.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ServiceEndpoint {
    Public { account: String },
    Custom { account: String, uri: String },
    Emulator,
}

impl ServiceEndpoint {
    fn from_connection_string(parsed: &ConnectionString<'_>) -> Result<Self> {
        if parsed.use_development_storage == Some(true) {
            return Ok(ServiceEndpoint::Emulator);
        }

        if let Some(endpoint) = parsed.blob_endpoint {
            let account = match parsed.account_name {
                Some(name) => name.to_string(),
                None => account_from_endpoint(endpoint)?,
            };
            return Ok(ServiceEndpoint::Custom {
                account,
                uri: endpoint.trim_end_matches('/').to_string(),
            });
        }

        let account = parsed
            .account_name
            .ok_or_else(|| BlobMonError::Provider {
                message: "connection string has neither AccountName nor BlobEndpoint".to_string(),
            })?
            .to_string();

        match parsed.endpoint_suffix {
            Some(suffix) if suffix != PUBLIC_ENDPOINT_SUFFIX => Ok(ServiceEndpoint::Custom {
                uri: format!("https://{}.blob.{}", account, suffix),
                account,
            }),
            _ => Ok(ServiceEndpoint::Public { account }),
        }
    }

    fn account(&self) -> &str {
        match self {
            ServiceEndpoint::Public { account } | ServiceEndpoint::Custom { account, .. } => account,
            ServiceEndpoint::Emulator => EMULATOR_ACCOUNT,
        }
    }
}

/// Account name from a blob endpoint: the first host label for
/// `https://<account>.blob.<suffix>`, or the first path segment for
/// path-style endpoints such as `http://127.0.0.1:10000/<account>`.
fn account_from_endpoint(endpoint: &str) -> Result<String> {
    let url = Url::parse(endpoint).map_err(BlobMonError::provider)?;

    let from_host = match url.host() {
        Some(Host::Domain(domain)) if domain != "localhost" => {
            domain.split('.').next().map(str::to_string)
        }
        _ => None,
    };
    let account = from_host.or_else(|| {
        url.path_segments()
            .and_then(|mut segments| segments.find(|s| !s.is_empty()))
            .map(str::to_string)
    });

    account
        .filter(|a| !a.is_empty())
        .ok_or_else(|| BlobMonError::Provider {
            message: format!("cannot derive an account name from BlobEndpoint '{}'", endpoint),
        })
}

pub struct AzureBlobProvider {
    account: String,
    service: BlobServiceClient,
}

impl AzureBlobProvider {
    pub fn from_connection_string(connection_string: &str) -> Result<Self> {
        let parsed = ConnectionString::new(connection_string).map_err(BlobMonError::provider)?;
        let endpoint = ServiceEndpoint::from_connection_string(&parsed)?;
        let account = endpoint.account().to_string();

        let builder = match endpoint {
            ServiceEndpoint::Emulator => ClientBuilder::emulator(),
            ServiceEndpoint::Public { account } => {
                let credentials = parsed.storage_credentials().map_err(BlobMonError::provider)?;
                ClientBuilder::new(account, credentials)
            }
            ServiceEndpoint::Custom { account, uri } => {
                let credentials = parsed.storage_credentials().map_err(BlobMonError::provider)?;
                ClientBuilder::with_location(CloudLocation::Custom { account, uri }, credentials)
            }
        };

        Ok(Self {
            service: builder.blob_service_client(),
            account,
        })
    }
}

#[async_trait]
impl BlobProvider for AzureBlobProvider {
    fn account_name(&self) -> &str {
        &self.account
    }

    async fn list_containers(&self) -> Result<Vec<String>> {
        let mut pages = self.service.list_containers().into_stream();
        let mut names = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(BlobMonError::provider)?;
            names.extend(page.containers.into_iter().map(|c| c.name));
        }
        Ok(names)
    }

    fn list_blobs(&self, container: &str) -> BlobNameStream {
        self.service
            .container_client(container)
            .list_blobs()
            .into_stream()
            .map(|page| {
                page.map(|p| {
                    p.blobs
                        .blobs()
                        .map(|blob| blob.name.clone())
                        .collect::<Vec<_>>()
                })
                .map_err(BlobMonError::provider)
            })
            .map_ok(|names| stream::iter(names.into_iter().map(Ok)))
            .try_flatten()
            .boxed()
    }

    async fn upload_blob(
        &self,
        container: &str,
        name: &str,
        data: Bytes,
        overwrite: bool,
    ) -> Result<()> {
        let blob = self.service.container_client(container).blob_client(name);

        if !overwrite && blob.exists().await.map_err(BlobMonError::provider)? {
            return Err(BlobMonError::Provider {
                message: format!("blob '{}' already exists", name),
            });
        }

        blob.put_block_blob(data)
            .await
            .map_err(BlobMonError::provider)?;
        Ok(())
    }

    async fn download_blob(&self, container: &str, path: &str) -> Result<Vec<u8>> {
        self.service
            .container_client(container)
            .blob_client(path)
            .get_content()
            .await
            .map_err(BlobMonError::provider)
    }

    async fn delete_blob(&self, container: &str, path: &str) -> Result<()> {
        self.service
            .container_client(container)
            .blob_client(path)
            .delete()
            .await
            .map_err(BlobMonError::provider)?;
        Ok(())
    }
}
