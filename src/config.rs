//! Configuration management for the Wrapped report CLI.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including Spotify API credentials, Groq
//! API settings, callback server settings, and other runtime parameters.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (production endpoint URLs)
//!
//! Endpoint URLs default to the public Spotify/Groq services and only need
//! to be overridden for testing. Client credentials and the Groq API key
//! have no defaults; their absence is reported as a typed configuration
//! error so callers can distinguish deployment mistakes from user mistakes.

use std::{env, path::PathBuf};

use dotenv;

use crate::error::{AuthError, DescribeError};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `wrappedcli/.env`. This allows users to store
/// configuration securely without hardcoding sensitive values.
///
/// A missing `.env` file is not an error; configuration may come entirely
/// from the process environment.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/wrappedcli/.env`
/// - macOS: `~/Library/Application Support/wrappedcli/.env`
/// - Windows: `%LOCALAPPDATA%/wrappedcli/.env`
///
/// # Returns
///
/// Returns `Ok(())` if the environment file is successfully loaded (or does
/// not exist), or an error string if directory creation or parsing fails.
///
/// # Example
///
/// ```
/// use wrappedcli::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("wrappedcli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the bind address for the local OAuth callback server.
///
/// Reads the `SERVER_ADDRESS` environment variable, falling back to
/// `127.0.0.1:8080`. The port must agree with the registered redirect URI.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8080".to_string())
}

/// Returns the Spotify API client ID for authentication.
///
/// Reads the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable, obtained
/// when registering the application with Spotify's developer platform.
///
/// # Errors
///
/// Returns `AuthError::MissingClientConfig` if the variable is not set.
/// This is a fatal misconfiguration; callers must surface it, never treat
/// it as "user not connected".
pub fn spotify_client_id() -> Result<String, AuthError> {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID")
        .map_err(|_| AuthError::MissingClientConfig("SPOTIFY_API_AUTH_CLIENT_ID"))
}

/// Returns the Spotify API client secret for authentication.
///
/// Reads the `SPOTIFY_API_AUTH_CLIENT_SECRET` environment variable. The
/// secret participates in the authorization-code exchange and in refresh
/// exchanges against the token endpoint.
///
/// # Errors
///
/// Returns `AuthError::MissingClientConfig` if the variable is not set.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> Result<String, AuthError> {
    env::var("SPOTIFY_API_AUTH_CLIENT_SECRET")
        .map_err(|_| AuthError::MissingClientConfig("SPOTIFY_API_AUTH_CLIENT_SECRET"))
}

/// Returns the Spotify OAuth redirect URI.
///
/// Reads the `SPOTIFY_API_REDIRECT_URI` environment variable, falling back
/// to `http://127.0.0.1:8080/callback`. This must match the redirect URI
/// registered in the Spotify application settings and the local callback
/// server address.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI")
        .unwrap_or_else(|_| "http://127.0.0.1:8080/callback".to_string())
}

/// Returns the Spotify API scope permissions requested during authorization.
///
/// Reads the `SPOTIFY_API_AUTH_SCOPE` environment variable, falling back to
/// the scopes the report pipelines need: top items and profile data.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE")
        .unwrap_or_else(|_| "user-top-read user-read-private user-read-email".to_string())
}

/// Returns the Spotify OAuth authorization URL.
///
/// Reads the `SPOTIFY_API_AUTH_URL` environment variable, falling back to
/// the public authorization endpoint. This is where users are redirected to
/// grant permissions to the application.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the Spotify OAuth token endpoint URL.
///
/// Reads the `SPOTIFY_API_TOKEN_URL` environment variable, falling back to
/// the public token endpoint. Used for both the authorization-code exchange
/// and refresh exchanges.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the Spotify Web API base URL.
///
/// Reads the `SPOTIFY_API_URL` environment variable, falling back to the
/// public Web API. This is used for all data operations after
/// authentication.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the Groq API key for narrative generation.
///
/// Reads the `GROQ_API_KEY` environment variable. An unset or empty value
/// is a deployment error.
///
/// # Errors
///
/// Returns `DescribeError::MissingApiKey` if the variable is unset or
/// empty. This must propagate; report narratives never silently degrade to
/// placeholder text because of a missing key.
pub fn groq_api_key() -> Result<String, DescribeError> {
    match env::var("GROQ_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(DescribeError::MissingApiKey),
    }
}

/// Returns the Groq chat-completions endpoint URL.
///
/// Reads the `GROQ_API_URL` environment variable, falling back to the
/// public OpenAI-compatible endpoint.
pub fn groq_apiurl() -> String {
    env::var("GROQ_API_URL")
        .unwrap_or_else(|_| "https://api.groq.com/openai/v1/chat/completions".to_string())
}

/// Returns the Groq model identifier used for narratives.
///
/// Reads the `GROQ_MODEL` environment variable, falling back to
/// `llama3-8b-8192`.
pub fn groq_model() -> String {
    env::var("GROQ_MODEL").unwrap_or_else(|_| "llama3-8b-8192".to_string())
}
