//! Failure taxonomy shared across the crate.
//!
//! Credential and top-list failures abort a report pipeline before anything
//! is written; narrative and recommendation failures degrade locally and
//! never surface from here. Configuration failures are fatal and must stay
//! distinguishable from "please reconnect" failures.

use thiserror::Error;

/// Errors raised by the file-backed stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors raised by the token lifecycle manager.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential is stored for the requested account.
    #[error("no Spotify credential stored for this account")]
    Unauthenticated,

    /// A registered client id/secret is missing from the environment.
    /// This is a deployment error, not a user error.
    #[error("missing client configuration: {0} is not set")]
    MissingClientConfig(&'static str),

    /// The authorization server rejected the refresh exchange or the
    /// exchange did not complete. The stored credential is left untouched.
    #[error("token refresh failed: {0}")]
    Refresh(String),

    #[error("credential store error: {0}")]
    Store(#[from] StoreError),
}

/// Raised when the narrative generator is constructed without an API key.
#[derive(Debug, Error)]
pub enum DescribeError {
    #[error("GROQ_API_KEY environment variable is not set")]
    MissingApiKey,
}

/// Terminal failure states of a report-generation request.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("not authenticated with Spotify")]
    Unauthenticated,

    #[error("missing client configuration: {0} is not set")]
    MissingClientConfig(&'static str),

    /// The requested term window is not one of the supported wire values.
    /// Checked before any external call is made.
    #[error("invalid term window: {0:?}")]
    InvalidTermWindow(String),

    /// A top-list or profile fetch failed; no partial report is persisted.
    #[error("Spotify data unavailable: {0}")]
    UpstreamDataUnavailable(String),

    /// The duo peer has no stored solo aggregation, or is not a valid peer.
    #[error("peer not available: {0}")]
    PeerNotFound(String),

    #[error("report store error: {0}")]
    Store(#[from] StoreError),
}

impl From<AuthError> for ReportError {
    fn from(err: AuthError) -> Self {
        match err {
            // A rejected refresh means this request proceeds as if the user
            // never connected; the stored refresh token stays usable.
            AuthError::Unauthenticated | AuthError::Refresh(_) => ReportError::Unauthenticated,
            AuthError::MissingClientConfig(var) => ReportError::MissingClientConfig(var),
            AuthError::Store(e) => ReportError::Store(e),
        }
    }
}
