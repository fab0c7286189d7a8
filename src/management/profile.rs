use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;

use crate::{error::StoreError, types::SpotifyProfile};

/// Cached solo aggregation per user. Duo reports read the peer's copy from
/// here instead of fetching with a credential the peer never granted.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, spotify_id: &str) -> Result<Option<SpotifyProfile>, StoreError>;
    async fn upsert(&self, profile: SpotifyProfile) -> Result<(), StoreError>;
}

pub struct FileProfileStore {
    root: PathBuf,
}

impl FileProfileStore {
    pub fn new() -> Self {
        let mut root = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        root.push("wrappedcli/cache/profiles");
        Self { root }
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    fn profile_path(&self, spotify_id: &str) -> PathBuf {
        self.root.join(format!("{}.json", spotify_id))
    }
}

impl Default for FileProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn get(&self, spotify_id: &str) -> Result<Option<SpotifyProfile>, StoreError> {
        match async_fs::read_to_string(self.profile_path(spotify_id)).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn upsert(&self, profile: SpotifyProfile) -> Result<(), StoreError> {
        async_fs::create_dir_all(&self.root).await?;
        let json = serde_json::to_string_pretty(&profile)?;
        async_fs::write(self.profile_path(&profile.spotify_id), json).await?;
        Ok(())
    }
}
