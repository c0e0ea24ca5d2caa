//! Session identity and its key-value persistence.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use movienight_common::ClientConfig;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};

/// Key the display name is stored under.
pub const USER_NAME_KEY: &str = "movieNightUserName";

/// String key-value storage that survives reloads.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    async fn get(&self, key: &str) -> ClientResult<Option<String>>;
    /// Write a value.
    async fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    /// Remove a value.
    async fn clear(&self, key: &str) -> ClientResult<()>;
}

/// In-memory storage, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self, key: &str) -> ClientResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// Storage backed by a JSON object in a file.
///
/// A missing file reads as empty; parent directories are created on the
/// first write.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Use the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Use the session file named in configuration.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.session_file)
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> ClientResult<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| ClientError::Storage(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents =
            serde_json::to_string_pretty(map).map_err(|e| ClientError::Storage(e.to_string()))?;
        tokio::fs::write(&self.path, contents).await?;
        debug!(path = %self.path.display(), "Session file written");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_map().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }

    async fn clear(&self, key: &str) -> ClientResult<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}

/// The voter's display name, persisted through a [`KeyValueStore`].
#[derive(Debug)]
pub struct SessionIdentity<K> {
    store: K,
    name: Option<String>,
}

impl<K: KeyValueStore> SessionIdentity<K> {
    /// Restore the saved name, if any.
    pub async fn load(store: K) -> ClientResult<Self> {
        let name = store.get(USER_NAME_KEY).await?.and_then(|n| normalize(&n));
        debug!(has_name = name.is_some(), "Session restored");
        Ok(Self { store, name })
    }

    /// The current name; `None` until one is set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether a name is set.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.name.is_some()
    }

    /// Save a new name. A blank name clears the identity instead.
    pub async fn set_name(&mut self, name: &str) -> ClientResult<()> {
        let Some(name) = normalize(name) else {
            return self.clear().await;
        };
        self.store.set(USER_NAME_KEY, &name).await?;
        info!(name = %name, "User name set");
        self.name = Some(name);
        Ok(())
    }

    /// Forget the name.
    pub async fn clear(&mut self) -> ClientResult<()> {
        self.store.clear(USER_NAME_KEY).await?;
        self.name = None;
        info!("User name cleared");
        Ok(())
    }
}

fn normalize(name: &str) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
