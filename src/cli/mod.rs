//! # CLI Module
//!
//! This module provides the command-line interface layer for wrappedcli, a
//! Spotify API client that generates Wrapped-style listening reports. It
//! implements all user-facing commands and coordinates between the token
//! lifecycle, the Spotify data client, the aggregation pipeline, the
//! narrative generator, and the local stores.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Links a Spotify account via the OAuth authorization-code flow
//! - [`disconnect`] - Deletes a linked account's stored credential
//!
//! ### Profile Operations
//!
//! - [`update_profile`] - Fetches and aggregates the account's listening
//!   profile across all three term windows
//! - [`show_profile`] - Displays the cached profile for one term window
//!
//! ### Report Operations
//!
//! - [`create_wrapped`] - Generates and persists a solo report snapshot
//! - [`wrapped_history`] - Lists the account's past report snapshots
//! - [`duo`] - Generates a duo report with another account's stored profile
//!
//! ## Error Presentation
//!
//! Every failure of a report pipeline maps to a distinct user-facing
//! message: "reconnect your account" is never conflated with "the service
//! is temporarily unavailable" or "invalid request". Deployment
//! misconfiguration (missing client credentials or API key) terminates the
//! program loudly.
//!
//! ## Progress and User Experience
//!
//! Long-running operations show a spinner; results render as tables via
//! `tabled`, matching the rest of the tool's output style.

mod auth;
mod duo;
mod profile;
mod wrapped;

pub use auth::auth;
pub use auth::disconnect;
pub use duo::duo;
pub use profile::show_profile;
pub use profile::update_profile;
pub use wrapped::create_wrapped;
pub use wrapped::wrapped_history;

use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error,
    error::ReportError,
    groq::GroqClient,
    info,
    management::{
        FileCredentialStore, FileProfileStore, FileReportStore, TokenManager,
    },
    report::ReportAssembler,
    spotify::{SpotifyAccounts, SpotifyClient},
    types::{ArtistTableRow, TermSummary, TrackTableRow},
    utils, warning,
};

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

// Wires the production collaborators together. Terminates the program on
// deployment misconfiguration; a missing narrative key must not be
// discovered halfway through a report.
pub(crate) fn build_assembler() -> (Arc<FileCredentialStore>, ReportAssembler) {
    let narrator = match GroqClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot create narrative client: {}", e),
    };

    let store = Arc::new(FileCredentialStore::new());
    let tokens = Arc::new(TokenManager::new(
        store.clone(),
        Arc::new(SpotifyAccounts::new()),
    ));
    let assembler = ReportAssembler::new(
        tokens,
        Arc::new(SpotifyClient::new()),
        Arc::new(narrator),
        Arc::new(FileProfileStore::new()),
        Arc::new(FileReportStore::new()),
    );

    (store, assembler)
}

pub(crate) async fn resolve_owner(user: Option<String>, store: &FileCredentialStore) -> String {
    if let Some(user) = user {
        return user;
    }

    match store.current().await {
        Ok(Some(owner)) => owner,
        Ok(None) => error!("No account linked. Please run wrappedcli auth first."),
        Err(e) => error!("Cannot read linked accounts: {}", e),
    }
}

pub(crate) fn report_error_message(err: &ReportError) -> String {
    match err {
        ReportError::Unauthenticated => {
            "You need to reconnect your Spotify account. Please run wrappedcli auth.".to_string()
        }
        ReportError::MissingClientConfig(var) => {
            format!("Deployment misconfiguration: {} is not set.", var)
        }
        ReportError::InvalidTermWindow(term) => format!(
            "Invalid term window {:?}. Supported values: short_term, medium_term, long_term.",
            term
        ),
        ReportError::UpstreamDataUnavailable(what) => format!(
            "Spotify data is temporarily unavailable ({}). Please try again later.",
            what
        ),
        ReportError::PeerNotFound(detail) => format!("Duo not possible: {}.", detail),
        ReportError::Store(e) => format!("Local storage error: {}.", e),
    }
}

pub(crate) fn print_term_summary(summary: &TermSummary) {
    use tabled::Table;

    let artist_rows: Vec<ArtistTableRow> = summary
        .favorite_artists
        .iter()
        .enumerate()
        .map(|(i, a)| ArtistTableRow {
            rank: i + 1,
            name: a.name.clone(),
            popularity: a.popularity,
            genres: utils::format_genres(&a.genres, 3),
        })
        .collect();

    if artist_rows.is_empty() {
        warning!("No favorite artists in this term window.");
    } else {
        info!("Favorite artists:");
        println!("{}", Table::new(artist_rows));
    }

    let track_rows: Vec<TrackTableRow> = summary
        .favorite_tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            rank: i + 1,
            name: t.name.clone(),
            artists: t.artists.clone(),
            album: t.album.clone(),
        })
        .collect();

    if !track_rows.is_empty() {
        info!("Favorite tracks:");
        println!("{}", Table::new(track_rows));
    }

    if !summary.favorite_genres.is_empty() {
        info!("Top genres: {}", summary.favorite_genres.join(", "));
    }

    let quirky_rows: Vec<ArtistTableRow> = summary
        .quirkiest_artists
        .iter()
        .enumerate()
        .map(|(i, a)| ArtistTableRow {
            rank: i + 1,
            name: a.name.clone(),
            popularity: a.popularity,
            genres: utils::format_genres(&a.genres, 3),
        })
        .collect();

    if !quirky_rows.is_empty() {
        info!("Quirkiest artists (lowest popularity first):");
        println!("{}", Table::new(quirky_rows));
    }
}
