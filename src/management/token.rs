use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    config,
    error::Error,
    types::{Credential, StoredToken},
};

/// Holder of the current access credential.
///
/// Only the auth flow writes a credential; the transfer orchestrator may
/// clear it when the remote rejects it. Everything else reads.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<Credential>, Error>;

    async fn save(&self, credential: &Credential) -> Result<(), Error>;

    /// Removes the credential. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), Error>;
}

/// Persists the credential as JSON in the local data directory.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_local_dir>/syncliked/cache/token.json`.
    pub fn default_location() -> Self {
        Self::new(config::data_dir().join("cache").join("token.json"))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<Credential>, Error> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::TokenStore(e.to_string())),
        };

        let token: StoredToken =
            serde_json::from_str(&content).map_err(|e| Error::TokenStore(e.to_string()))?;
        Ok(Some(token.access_token))
    }

    async fn save(&self, credential: &Credential) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::TokenStore(e.to_string()))?;
        }

        let token = StoredToken {
            access_token: credential.clone(),
            obtained_at: Utc::now().timestamp(),
        };
        let json =
            serde_json::to_string_pretty(&token).map_err(|e| Error::TokenStore(e.to_string()))?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| Error::TokenStore(e.to_string()))
    }

    async fn clear(&self) -> Result<(), Error> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::TokenStore(e.to_string())),
        }
    }
}

/// In-process store, used by tests and embedders that manage persistence
/// themselves.
#[derive(Default)]
pub struct MemoryTokenStore {
    credential: Mutex<Option<Credential>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: Mutex::new(Some(credential)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<Credential>, Error> {
        Ok(self.credential.lock().await.clone())
    }

    async fn save(&self, credential: &Credential) -> Result<(), Error> {
        *self.credential.lock().await = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), Error> {
        self.credential.lock().await.take();
        Ok(())
    }
}
