//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API and the Spotify
//! accounts service: the OAuth 2.0 authorization-code flow, the token
//! endpoint (code exchange and refresh), and the bearer-authenticated data
//! endpoints the report pipelines read from. It abstracts away HTTP
//! communication, response decoding, and failure classification, providing
//! a clean Rust interface for the higher-level report logic.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Report Assembly)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authorization (OAuth 2.0 authorization-code + state)
//!     ├── Token Endpoint (exchange, refresh)
//!     └── Data Endpoints (profile, top items, recommendations)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Accounts Service / Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authorization Module
//!
//! [`auth`] - Implements the OAuth 2.0 authorization-code flow:
//! - **Authorize URL**: Builds the browser URL with scope, redirect URI, and
//!   a fresh `state` parameter
//! - **Local Callback Server**: Temporary HTTP server receives the redirect
//! - **Token Endpoint Seam**: The [`AuthorizationServer`] trait covers code
//!   exchange and refresh so the token lifecycle is testable without a
//!   network
//! - **Account Resolution**: After the exchange, the profile endpoint
//!   resolves the stable owner id the credential is stored under
//!
//! ### Data Client Module
//!
//! [`client`] - Bearer-authenticated GET endpoints behind the
//! [`MusicSource`] seam:
//! - **Profile**: Current user's id, display name, email, and avatar
//! - **Top Items**: Top artists and tracks per term window, limit clamped to
//!   the provider's 1..=50 bound
//! - **Recommendations**: Seeded track recommendations, a best-effort call
//!   that yields an empty list on any failure
//!
//! ## Failure Classification
//!
//! Data endpoints never raise past this layer: a non-2xx response, a
//! timeout, or an unexpected response shape yields `None` (or an empty
//! list for recommendations), and the caller decides whether that aborts a
//! pipeline. The token endpoint is the opposite: its failures carry the
//! upstream detail, because "the provider rejected the refresh" and "the
//! user never connected" must stay distinguishable.
//!
//! ## Timeouts
//!
//! All requests carry explicit bounds: 5 seconds for data endpoints, 10
//! seconds for the token endpoint. No call in this module retries
//! automatically.

pub mod auth;
pub mod client;

pub use auth::AuthorizationServer;
pub use auth::SpotifyAccounts;
pub use client::MusicSource;
pub use client::SpotifyClient;
