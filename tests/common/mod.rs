#![allow(dead_code)]

use async_trait::async_trait;
use blobmon::core::{Account, BlobNameStream, BlobProvider, ProviderConnector};
use blobmon::{BlobMonError, Result, Settings};
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory stand-in for a storage account.
#[derive(Default)]
pub struct MemoryProvider {
    name: String,
    containers: Mutex<BTreeMap<String, BTreeMap<String, Vec<u8>>>>,
    list_failures: Mutex<HashMap<String, String>>,
    mid_stream_failures: Mutex<HashMap<String, String>>,
    op_failures: Mutex<HashMap<String, String>>,
    fail_container_discovery: bool,
    list_delay: Option<Duration>,
    pub list_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
}

impl MemoryProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn failing_discovery(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fail_container_discovery: true,
            ..Default::default()
        }
    }

    pub fn with_container(self, container: &str, blobs: &[&str]) -> Self {
        let entries = blobs
            .iter()
            .map(|b| (b.to_string(), b.as_bytes().to_vec()))
            .collect();
        self.containers
            .lock()
            .unwrap()
            .insert(container.to_string(), entries);
        self
    }

    /// Listing this container fails before yielding anything.
    pub fn fail_listing(self, container: &str, message: &str) -> Self {
        self.list_failures
            .lock()
            .unwrap()
            .insert(container.to_string(), message.to_string());
        self
    }

    /// Listing this container yields its first blob, then fails.
    pub fn fail_listing_midway(self, container: &str, message: &str) -> Self {
        self.mid_stream_failures
            .lock()
            .unwrap()
            .insert(container.to_string(), message.to_string());
        self
    }

    /// Every blob listing waits this long before yielding.
    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    /// Upload, download or delete of `container/path` fails.
    pub fn fail_op(self, item: &str, message: &str) -> Self {
        self.op_failures
            .lock()
            .unwrap()
            .insert(item.to_string(), message.to_string());
        self
    }

    pub fn blob(&self, container: &str, path: &str) -> Option<Vec<u8>> {
        self.containers
            .lock()
            .unwrap()
            .get(container)
            .and_then(|c| c.get(path).cloned())
    }

    pub fn blob_names(&self, container: &str) -> Vec<String> {
        self.containers
            .lock()
            .unwrap()
            .get(container)
            .map(|c| c.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn listing_items(&self, container: &str) -> Vec<Result<String>> {
        if let Some(message) = self.list_failures.lock().unwrap().get(container) {
            return vec![Err(BlobMonError::provider(message))];
        }

        let names = match self.containers.lock().unwrap().get(container) {
            Some(blobs) => blobs.keys().cloned().collect::<Vec<_>>(),
            None => {
                return vec![Err(BlobMonError::provider(format!(
                    "ContainerNotFound: {}",
                    container
                )))]
            }
        };

        match self.mid_stream_failures.lock().unwrap().get(container) {
            Some(message) => names
                .into_iter()
                .take(1)
                .map(Ok)
                .chain(std::iter::once(Err(BlobMonError::provider(message))))
                .collect(),
            None => names.into_iter().map(Ok).collect(),
        }
    }

    fn check_op(&self, container: &str, path: &str) -> Result<()> {
        let key = format!("{}/{}", container, path);
        match self.op_failures.lock().unwrap().get(&key) {
            Some(message) => Err(BlobMonError::provider(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BlobProvider for MemoryProvider {
    fn account_name(&self) -> &str {
        &self.name
    }

    async fn list_containers(&self) -> Result<Vec<String>> {
        if self.fail_container_discovery {
            return Err(BlobMonError::provider("AuthenticationFailed"));
        }
        Ok(self.containers.lock().unwrap().keys().cloned().collect())
    }

    fn list_blobs(&self, container: &str) -> BlobNameStream {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let items = self.listing_items(container);

        match self.list_delay {
            Some(delay) => stream::once(async move {
                tokio::time::sleep(delay).await;
                stream::iter(items)
            })
            .flatten()
            .boxed(),
            None => stream::iter(items).boxed(),
        }
    }

    async fn upload_blob(&self, container: &str, name: &str, data: Bytes, overwrite: bool) -> Result<()> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.check_op(container, name)?;

        let mut containers = self.containers.lock().unwrap();
        let blobs = containers
            .get_mut(container)
            .ok_or_else(|| BlobMonError::provider("ContainerNotFound"))?;
        if !overwrite && blobs.contains_key(name) {
            return Err(BlobMonError::provider("BlobAlreadyExists"));
        }
        blobs.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    async fn download_blob(&self, container: &str, path: &str) -> Result<Vec<u8>> {
        self.check_op(container, path)?;
        self.blob(container, path)
            .ok_or_else(|| BlobMonError::provider("BlobNotFound"))
    }

    async fn delete_blob(&self, container: &str, path: &str) -> Result<()> {
        self.check_op(container, path)?;
        let mut containers = self.containers.lock().unwrap();
        containers
            .get_mut(container)
            .and_then(|c| c.remove(path))
            .map(|_| ())
            .ok_or_else(|| BlobMonError::provider("BlobNotFound"))
    }
}

/// Hands out pre-built providers keyed by connection string. Unknown
/// strings fail to connect.
#[derive(Default)]
pub struct MemoryConnector {
    providers: HashMap<String, Arc<MemoryProvider>>,
    pub connect_calls: AtomicUsize,
}

impl MemoryConnector {
    pub fn with(mut self, connection_string: &str, provider: MemoryProvider) -> Self {
        self.providers
            .insert(connection_string.to_string(), Arc::new(provider));
        self
    }

    pub fn provider(&self, connection_string: &str) -> Arc<MemoryProvider> {
        Arc::clone(&self.providers[connection_string])
    }
}

impl ProviderConnector for MemoryConnector {
    fn connect(&self, connection_string: &str) -> Result<Arc<dyn BlobProvider>> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        match self.providers.get(connection_string) {
            Some(provider) => Ok(Arc::clone(provider) as Arc<dyn BlobProvider>),
            None => Err(BlobMonError::provider("invalid connection string")),
        }
    }
}

pub fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

pub fn settings(toml: &str) -> Settings {
    Settings::from_toml_str(toml).unwrap()
}

pub fn account(index: usize, provider: Arc<MemoryProvider>, containers: &[&str]) -> Account {
    Account {
        index,
        name: provider.account_name().to_string(),
        client: provider,
        containers: containers.iter().map(|c| c.to_string()).collect(),
    }
}
