use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    error::AuthError,
    management::CredentialStore,
    spotify::AuthorizationServer,
    types::{Credential, TokenResponse},
};

pub struct TokenManager {
    store: Arc<dyn CredentialStore>,
    auth_server: Arc<dyn AuthorizationServer>,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TokenManager {
    pub fn new(store: Arc<dyn CredentialStore>, auth_server: Arc<dyn AuthorizationServer>) -> Self {
        TokenManager {
            store,
            auth_server,
            locks: Mutex::new(HashMap::new()),
        }
    }

    // One lock per owner. Held across read-expiry -> refresh -> write-back,
    // and not a moment longer: two concurrent callers for the same owner must
    // never both see an expired credential and both hit the token endpoint.
    async fn owner_lock(&self, owner_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(owner_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    pub async fn get_valid_credential(&self, owner_id: &str) -> Result<Credential, AuthError> {
        let lock = self.owner_lock(owner_id).await;
        let _held = lock.lock().await;

        let credential = self
            .store
            .get(owner_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        if !credential.is_expired(Utc::now().timestamp()) {
            return Ok(credential);
        }
        self.refresh_locked(credential).await
    }

    pub async fn refresh(&self, owner_id: &str) -> Result<Credential, AuthError> {
        let lock = self.owner_lock(owner_id).await;
        let _held = lock.lock().await;

        let credential = self
            .store
            .get(owner_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;
        self.refresh_locked(credential).await
    }

    async fn refresh_locked(&self, current: Credential) -> Result<Credential, AuthError> {
        let response = self
            .auth_server
            .refresh_access_token(&current.refresh_token)
            .await?;
        let now = Utc::now().timestamp();

        let refreshed = Credential {
            owner_id: current.owner_id,
            access_token: response.access_token,
            token_kind: response.token_type,
            expires_at: now + response.expires_in,
            // the provider may omit the refresh token; the stored one stays valid
            refresh_token: response.refresh_token.unwrap_or(current.refresh_token),
            created_at: current.created_at,
        };

        self.store.upsert(refreshed.clone()).await?;
        Ok(refreshed)
    }

    pub async fn upsert_from_authorization(
        &self,
        owner_id: &str,
        response: TokenResponse,
    ) -> Result<Credential, AuthError> {
        let lock = self.owner_lock(owner_id).await;
        let _held = lock.lock().await;

        let now = Utc::now().timestamp();
        let created_at = match self.store.get(owner_id).await? {
            Some(existing) => existing.created_at,
            None => now,
        };

        let credential = Credential {
            owner_id: owner_id.to_string(),
            access_token: response.access_token,
            token_kind: response.token_type,
            expires_at: now + response.expires_in,
            refresh_token: response.refresh_token.unwrap_or_default(),
            created_at,
        };

        self.store.upsert(credential.clone()).await?;
        Ok(credential)
    }

    // Fails closed: any error during the check counts as not authenticated.
    pub async fn is_authenticated(&self, owner_id: &str) -> bool {
        self.get_valid_credential(owner_id).await.is_ok()
    }

    pub async fn disconnect(&self, owner_id: &str) -> Result<(), AuthError> {
        let lock = self.owner_lock(owner_id).await;
        let _held = lock.lock().await;

        self.store.delete(owner_id).await?;
        Ok(())
    }
}
