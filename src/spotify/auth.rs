use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config, error,
    error::AuthError,
    management::{FileCredentialStore, TokenManager},
    server::start_api_server,
    spotify::{MusicSource, SpotifyClient},
    success,
    types::{OauthExchange, TokenResponse},
    utils, warning,
};

const TOKEN_ENDPOINT_TIMEOUT: Duration = Duration::from_secs(10);

/// The external authorization server's token endpoint.
///
/// Covers the two grants the application uses: exchanging an authorization
/// code after the user consents in the browser, and refreshing an expired
/// access token. The trait exists so the token lifecycle manager can be
/// exercised against a fake endpoint; production code always uses
/// [`SpotifyAccounts`].
#[async_trait]
pub trait AuthorizationServer: Send + Sync {
    /// Exchanges an authorization code for a token response.
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AuthError>;

    /// Exchanges a refresh token for a fresh token response. The response
    /// may omit `refresh_token`; callers keep the old one in that case.
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenResponse, AuthError>;
}

/// Production implementation of [`AuthorizationServer`] against the Spotify
/// accounts service.
///
/// Both grants are form-encoded POSTs carrying the registered client id and
/// client secret. Missing client configuration surfaces as
/// `AuthError::MissingClientConfig` before any request is sent; upstream
/// rejections and decode failures surface as `AuthError::Refresh` with the
/// upstream detail attached. Requests are bounded by a 10 second timeout.
pub struct SpotifyAccounts {
    http: Client,
}

impl SpotifyAccounts {
    pub fn new() -> Self {
        SpotifyAccounts {
            http: Client::new(),
        }
    }

    async fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenResponse, AuthError> {
        let response = self
            .http
            .post(config::spotify_apitoken_url())
            .form(form)
            .timeout(TOKEN_ENDPOINT_TIMEOUT)
            .send()
            .await
            .map_err(|e| AuthError::Refresh(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Refresh(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| AuthError::Refresh(format!("unexpected token response shape: {}", e)))
    }
}

impl Default for SpotifyAccounts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthorizationServer for SpotifyAccounts {
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AuthError> {
        let client_id = config::spotify_client_id()?;
        let client_secret = config::spotify_client_secret()?;
        let redirect_uri = config::spotify_redirect_uri();

        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &redirect_uri),
            ("client_id", &client_id),
            ("client_secret", &client_secret),
        ])
        .await
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<TokenResponse, AuthError> {
        let client_id = config::spotify_client_id()?;
        let client_secret = config::spotify_client_secret()?;

        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &client_id),
            ("client_secret", &client_secret),
        ])
        .await
    }
}

/// Builds the Spotify authorization URL the user's browser is sent to.
///
/// The URL carries the registered client id, the requested scope, the
/// redirect URI of the local callback server, and the given `state`
/// parameter. The callback handler rejects redirects whose `state` does not
/// match, which ties the received authorization code to the flow this
/// process started.
///
/// # Errors
///
/// Returns `AuthError::MissingClientConfig` if the client id is not
/// configured.
pub fn authorize_url(state: &str) -> Result<String, AuthError> {
    let client_id = config::spotify_client_id()?;
    Ok(format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&state={state}",
        auth_url = config::spotify_apiauth_url(),
        client_id = client_id,
        redirect_uri = config::spotify_redirect_uri(),
        scope = config::spotify_scope().replace(' ', "%20"),
        state = state,
    ))
}

/// Runs the complete OAuth 2.0 authorization-code flow with Spotify.
///
/// This function orchestrates the entire link process:
/// 1. Generating a fresh `state` parameter for the flow
/// 2. Starting a local callback server
/// 3. Opening the authorization URL in the user's browser
/// 4. Waiting for the OAuth callback to exchange the code
/// 5. Resolving the account's Spotify id via the profile endpoint
/// 6. Persisting the credential under that id and marking it current
///
/// # Arguments
///
/// * `shared_state` - Thread-safe shared state carrying the expected
///   `state` parameter and, once the callback fires, the token response
///
/// # Error Handling
///
/// - Browser launch failures result in a warning with manual URL
///   instructions
/// - Missing client configuration terminates the program with an error
/// - Authentication timeouts or failures terminate with an error message
/// - Credential persistence failures terminate with an error
///
/// # User Experience
///
/// The function provides feedback throughout the process and confirms the
/// linked account name on success.
pub async fn link(shared_state: Arc<Mutex<Option<OauthExchange>>>) {
    let state = utils::generate_state();

    // start callback server
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    let auth_url = match authorize_url(&state) {
        Ok(url) => url,
        Err(e) => error!("Cannot build authorization URL: {}", e),
    };

    // Store the expected state before the redirect fires
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(OauthExchange { state, token: None });
    }

    // Open the authorization URL in the default browser
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for the callback to be hit
    let token = wait_for_token(shared_state).await;

    match token {
        Some(response) => match persist_credential(response).await {
            Ok(owner_id) => {
                success!("Account {} linked successfully!", owner_id);
            }
            Err(e) => {
                error!("Failed to store credential: {}", e);
            }
        },
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Waits for the OAuth callback to complete and return a token response.
///
/// Polls the shared state for a completed exchange with a 60-second
/// timeout. This function runs concurrently with the callback handler that
/// populates the token after a successful code exchange.
///
/// # Returns
///
/// Returns `Some(TokenResponse)` if authentication completes within the
/// timeout period, or `None` if the timeout is reached without a token.
async fn wait_for_token(
    shared_state: Arc<Mutex<Option<OauthExchange>>>,
) -> Option<TokenResponse> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(exchange) = lock.as_ref() {
            if let Some(token) = &exchange.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

// Resolves the owner id behind the fresh token and stores the credential
// under it. The Spotify user id is the one stable identity key; session-ish
// keys would break duo lookups across machines.
async fn persist_credential(response: TokenResponse) -> Result<String, String> {
    let music = SpotifyClient::new();
    let profile = music
        .get_profile(&response.access_token)
        .await
        .ok_or("could not resolve the linked account's profile")?;

    let store = Arc::new(FileCredentialStore::new());
    let tokens = TokenManager::new(store.clone(), Arc::new(SpotifyAccounts::new()));

    tokens
        .upsert_from_authorization(&profile.id, response)
        .await
        .map_err(|e| e.to_string())?;
    store
        .set_current(&profile.id)
        .await
        .map_err(|e| e.to_string())?;

    Ok(profile.id)
}
