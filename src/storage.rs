//! Local persistent storage for wallet state.
//!
//! Abstraction for keyed state storage plus the two implementations the app
//! uses: a JSON file on disk and an in-memory map for tests and ephemeral
//! runs. A missing key, an unreadable file and an unparseable value all look
//! identical to callers: absent. Corrupted state must never block boot.

use crate::error::WalletError;
use crate::network::CustomNetworkConfig;
use crate::node::{CustomNodeConfig, NodeSelection};
use crate::store::MetaState;
use chrono::Utc;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

/// Storage key for the persisted configuration fragment.
pub const CONFIG_KEY: &str = "config";
/// Storage key for the persisted custom-token list.
pub const CUSTOM_TOKENS_KEY: &str = "customTokens";

const BACKUP_SUFFIX: &str = ".backup";

/// Keyed read/write access to durable local storage. Implementations must
/// report any value they cannot produce as absent rather than failing reads.
pub trait StateStore: Send + Sync {
    fn load(&self, key: &str) -> Option<Value>;
    fn save(&self, key: &str, value: &Value) -> Result<(), WalletError>;
}

/// Load and deserialize a stored value, treating shape mismatches as absent.
pub fn load_state<T: DeserializeOwned>(store: &dyn StateStore, key: &str) -> Option<T> {
    let value = store.load(key)?;
    match serde_json::from_value(value) {
        Ok(state) => Some(state),
        Err(err) => {
            warn!("Discarding stored value under '{}': {}", key, err);
            None
        }
    }
}

/// The subset of network state the app writes back on change. Static tables
/// are compiled in and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedNetworks {
    #[serde(default)]
    pub custom_networks: HashMap<String, CustomNetworkConfig>,
    pub selected_network: String,
}

/// The subset of node state the app writes back on change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedNodes {
    #[serde(default)]
    pub custom_nodes: HashMap<String, CustomNodeConfig>,
    pub selected: NodeSelection,
}

/// The persisted configuration document. Every branch is optional so partial
/// or stale documents degrade instead of failing the whole load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedConfig {
    #[serde(default)]
    pub networks: Option<PersistedNetworks>,
    #[serde(default)]
    pub nodes: Option<PersistedNodes>,
    #[serde(default)]
    pub meta: Option<MetaState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentMeta {
    version: String,
    last_modified: String,
}

impl Default for DocumentMeta {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        DocumentMeta {
            version: "1.0.0".to_string(),
            last_modified: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FileDocument {
    #[serde(default)]
    meta: DocumentMeta,
    #[serde(default)]
    entries: HashMap<String, Value>,
}

/// JSON-file-backed store. The whole document is read once at open; writes
/// update the in-memory copy and flush it atomically (write to temp file,
/// sync, rename) with a backup of the previous version.
pub struct FileStore {
    path: PathBuf,
    inner: RwLock<FileDocument>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file is missing or
    /// does not parse.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let document = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(document) => document,
                Err(err) => {
                    warn!("State file {:?} is corrupted, starting fresh: {}", path, err);
                    FileDocument::default()
                }
            },
            Err(_) => FileDocument::default(),
        };
        FileStore {
            path,
            inner: RwLock::new(document),
        }
    }

    /// Default location under the platform data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("emberwallet")
            .join("state.json")
    }

    fn flush(&self, document: &FileDocument) -> Result<(), WalletError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    WalletError::StorageError(format!("Failed to create data dir: {}", e))
                })?;
            }
        }

        if self.path.exists() {
            let backup_path = self.path.with_extension(format!("json{}", BACKUP_SUFFIX));
            fs::copy(&self.path, &backup_path)
                .map_err(|e| WalletError::StorageError(format!("Failed to create backup: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(document)
            .map_err(|e| WalletError::StorageError(format!("Failed to serialize state: {}", e)))?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path)
            .map_err(|e| WalletError::StorageError(format!("Failed to create temp file: {}", e)))?;
        file.write_all(json.as_bytes())
            .map_err(|e| WalletError::StorageError(format!("Failed to write state: {}", e)))?;
        file.sync_all()
            .map_err(|e| WalletError::StorageError(format!("Failed to sync file: {}", e)))?;
        drop(file);

        fs::rename(&temp_path, &self.path)
            .map_err(|e| WalletError::StorageError(format!("Failed to finalize write: {}", e)))?;

        Ok(())
    }
}

impl StateStore for FileStore {
    fn load(&self, key: &str) -> Option<Value> {
        let inner = self.inner.read();
        inner.entries.get(key).cloned()
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), WalletError> {
        let mut inner = self.inner.write();
        inner.entries.insert(key.to_string(), value.clone());
        inner.meta.last_modified = Utc::now().to_rfc3339();
        self.flush(&inner)
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    fn save(&self, key: &str, value: &Value) -> Result<(), WalletError> {
        self.entries.write().insert(key.to_string(), value.clone());
        Ok(())
    }
}
