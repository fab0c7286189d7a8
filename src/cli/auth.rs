use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    cli, error,
    management::{FileCredentialStore, TokenManager},
    spotify::{self, SpotifyAccounts},
    success,
    types::OauthExchange,
};

pub async fn auth(shared_state: Arc<Mutex<Option<OauthExchange>>>) {
    spotify::auth::link(shared_state).await;
}

pub async fn disconnect(user: Option<String>) {
    let store = Arc::new(FileCredentialStore::new());
    let owner = cli::resolve_owner(user, &store).await;

    let tokens = TokenManager::new(store.clone(), Arc::new(SpotifyAccounts::new()));
    if let Err(e) = tokens.disconnect(&owner).await {
        error!("Failed to remove credential for {}: {}", owner, e);
    }
    if let Err(e) = store.clear_current_if(&owner).await {
        error!("Failed to clear current account pointer: {}", e);
    }

    success!("Account {} disconnected.", owner);
}
