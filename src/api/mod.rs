//! # API Module
//!
//! This module provides the HTTP endpoints for the short-lived local server
//! wrappedcli runs during account linking. It implements the OAuth callback
//! handler and a health check.
//!
//! ## Overview
//!
//! The API module is the web interface layer of the authorization-code flow:
//! Spotify redirects the user's browser back to this process, and the
//! endpoints here turn that redirect into a stored credential.
//!
//! - **OAuth Authentication Flow**: The callback handler validates the
//!   `state` parameter and exchanges the authorization code for tokens at
//!   the Spotify accounts service.
//! - **Health Monitoring**: A health check endpoint reports application
//!   status and version, useful when the callback server seems unreachable.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`callback`] - Handles the redirect from Spotify's authorization
//!   server: checks the `state` parameter against the one this flow
//!   generated, exchanges the code, and stashes the token response for the
//!   waiting CLI command.
//!
//! ### Monitoring
//!
//! - [`health`] - Returns application status and version information.
//!
//! ## Architecture
//!
//! Built on the [Axum](https://docs.rs/axum) web framework; each endpoint
//! is an async function wired into the router in [`crate::server`].
//!
//! ## Security Considerations
//!
//! - The `state` parameter ties a received authorization code to the flow
//!   this process started; mismatches are rejected.
//! - The client secret is read from configuration only at exchange time and
//!   never appears in a URL or a response body.
//!
//! ## Related Modules
//!
//! - [`crate::spotify`] - Spotify accounts service integration
//! - [`crate::types`] - Type definitions for the exchange state

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
