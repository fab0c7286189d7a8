use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;

use crate::{error::StoreError, types::Credential};

/// Durable mapping from owner id to one OAuth credential record. Upsert
/// semantics: at most one credential per owner.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, owner_id: &str) -> Result<Option<Credential>, StoreError>;
    async fn upsert(&self, credential: Credential) -> Result<(), StoreError>;
    async fn delete(&self, owner_id: &str) -> Result<(), StoreError>;
}

pub struct FileCredentialStore {
    root: PathBuf,
}

impl FileCredentialStore {
    pub fn new() -> Self {
        let mut root = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        root.push("wrappedcli/cache/credentials");
        Self { root }
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    fn credential_path(&self, owner_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", owner_id))
    }

    fn current_path(&self) -> PathBuf {
        self.root.join("current")
    }

    pub async fn set_current(&self, owner_id: &str) -> Result<(), StoreError> {
        async_fs::create_dir_all(&self.root).await?;
        async_fs::write(self.current_path(), owner_id).await?;
        Ok(())
    }

    pub async fn current(&self) -> Result<Option<String>, StoreError> {
        match async_fs::read_to_string(self.current_path()).await {
            Ok(owner) => {
                let owner = owner.trim().to_string();
                if owner.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(owner))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    pub async fn clear_current_if(&self, owner_id: &str) -> Result<(), StoreError> {
        if self.current().await?.as_deref() == Some(owner_id) {
            match async_fs::remove_file(self.current_path()).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(StoreError::Io(e)),
            }
        }
        Ok(())
    }
}

impl Default for FileCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, owner_id: &str) -> Result<Option<Credential>, StoreError> {
        match async_fs::read_to_string(self.credential_path(owner_id)).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn upsert(&self, credential: Credential) -> Result<(), StoreError> {
        async_fs::create_dir_all(&self.root).await?;
        let json = serde_json::to_string_pretty(&credential)?;
        async_fs::write(self.credential_path(&credential.owner_id), json).await?;
        Ok(())
    }

    async fn delete(&self, owner_id: &str) -> Result<(), StoreError> {
        match async_fs::remove_file(self.credential_path(owner_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}
