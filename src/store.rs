//! Durable backends for the documents owned by a [`ResourceActor`](crate::actor_framework::ResourceActor).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

use crate::actor_framework::Entity;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {} is malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage the resource actor writes through to.
///
/// `persist` is awaited before a write is acknowledged, so a returned `Ok`
/// means the document is durable as far as the backend can promise.
#[async_trait]
pub trait DocumentStore<T: Entity>: Send + Sync + 'static {
    async fn load(&mut self) -> Result<Vec<T>, StoreError>;
    async fn persist(&mut self, document: &T) -> Result<(), StoreError>;
}

/// Keeps nothing; the actor's own map is the only copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryStore;

#[async_trait]
impl<T: Entity> DocumentStore<T> for MemoryStore {
    async fn load(&mut self) -> Result<Vec<T>, StoreError> {
        Ok(Vec::new())
    }

    async fn persist(&mut self, _document: &T) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Whole collection in a single JSON object keyed by document id.
///
/// Each persist rewrites a sibling temp file and renames it over the target.
pub struct JsonFileStore<T> {
    path: PathBuf,
    documents: BTreeMap<String, T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            documents: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl<T: Serialize> JsonFileStore<T> {
    async fn write_all(&self) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&self.documents).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| self.io_error(e))?;
        }

        let temp = self.temp_path();
        fs::write(&temp, bytes).await.map_err(|e| self.io_error(e))?;
        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(self.io_error(e));
        }
        Ok(())
    }
}

#[async_trait]
impl<T> DocumentStore<T> for JsonFileStore<T>
where
    T: Entity + Serialize + DeserializeOwned,
{
    async fn load(&mut self) -> Result<Vec<T>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No store file yet, starting empty");
                self.documents.clear();
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        self.documents = serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), documents = self.documents.len(), "Loaded store file");
        Ok(self.documents.values().cloned().collect())
    }

    async fn persist(&mut self, document: &T) -> Result<(), StoreError> {
        let key = document.id().to_string();
        let previous = self.documents.insert(key.clone(), document.clone());

        if let Err(e) = self.write_all().await {
            match previous {
                Some(old) => self.documents.insert(key, old),
                None => self.documents.remove(&key),
            };
            return Err(e);
        }

        debug!(id = %key, "Persisted document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRecord;

    fn record(key: &str, bio: &str) -> UserRecord {
        UserRecord {
            identity_key: key.into(),
            email: format!("{key}@example.com"),
            name: String::new(),
            headline: String::new(),
            bio: bio.into(),
            profile_picture: String::new(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::<UserRecord>::new(dir.path().join("users.json"));

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persisted_documents_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("users.json");

        let mut store = JsonFileStore::<UserRecord>::new(&path);
        store.persist(&record("u1", "first")).await.unwrap();
        store.persist(&record("u2", "")).await.unwrap();
        store.persist(&record("u1", "second")).await.unwrap();

        let mut reopened = JsonFileStore::<UserRecord>::new(&path);
        let mut loaded = reopened.load().await.unwrap();
        loaded.sort_by(|a, b| a.identity_key.cmp(&b.identity_key));

        assert_eq!(loaded, vec![record("u1", "second"), record("u2", "")]);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, b"not json").unwrap();

        let mut store = JsonFileStore::<UserRecord>::new(&path);
        assert!(matches!(store.load().await, Err(StoreError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_failed_write_rolls_back_index() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = dir.path().join("users.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("blocker"), b"x").unwrap();

        let mut store = JsonFileStore::<UserRecord>::new(&path);
        assert!(store.persist(&record("u1", "x")).await.is_err());
        assert!(store.documents.is_empty());
        assert!(!store.temp_path().exists());
    }
}
