//! Report assembly pipelines.
//!
//! Each pipeline runs the same sequence: validate input, obtain a valid
//! credential, fetch raw top lists, aggregate, enrich with a narrative
//! (best effort), persist the snapshot. Credential and top-list failures
//! abort before anything is written; narrative and recommendation failures
//! never abort.

use std::sync::Arc;

use chrono::Utc;

use crate::{
    aggregate::{self, QUIRKIEST, TOP_GENRES},
    error::ReportError,
    groq::Narrator,
    management::{ProfileStore, ReportStore, TokenManager},
    spotify::MusicSource,
    types::{
        RecommendationSeeds, SpotifyProfile, TermSummary, TermWindow, WrappedReport,
    },
};

/// Top-item fetches ask the provider for this many entries per list.
pub const TOP_ITEMS_LIMIT: u32 = 20;

/// Number of recommended songs attached to a report.
pub const RECOMMENDATION_LIMIT: u32 = 5;

const SEED_ARTISTS: usize = 5;

pub struct ReportAssembler {
    tokens: Arc<TokenManager>,
    music: Arc<dyn MusicSource>,
    narrator: Arc<dyn Narrator>,
    profiles: Arc<dyn ProfileStore>,
    reports: Arc<dyn ReportStore>,
}

impl ReportAssembler {
    pub fn new(
        tokens: Arc<TokenManager>,
        music: Arc<dyn MusicSource>,
        narrator: Arc<dyn Narrator>,
        profiles: Arc<dyn ProfileStore>,
        reports: Arc<dyn ReportStore>,
    ) -> Self {
        ReportAssembler {
            tokens,
            music,
            narrator,
            profiles,
            reports,
        }
    }

    // Term validation happens before any credential read or network round
    // trip; "weekly" must never cost an HTTP call.
    fn validate_term(term: &str) -> Result<TermWindow, ReportError> {
        TermWindow::from_wire(term).ok_or_else(|| ReportError::InvalidTermWindow(term.to_string()))
    }

    async fn fetch_term_summary(
        &self,
        token: &str,
        term: TermWindow,
    ) -> Result<TermSummary, ReportError> {
        let (artists, tracks) = tokio::join!(
            self.music.get_top_artists(token, term, TOP_ITEMS_LIMIT),
            self.music.get_top_tracks(token, term, TOP_ITEMS_LIMIT),
        );

        let artists = artists.ok_or_else(|| {
            ReportError::UpstreamDataUnavailable(format!("top artists ({})", term))
        })?;
        let tracks = tracks.ok_or_else(|| {
            ReportError::UpstreamDataUnavailable(format!("top tracks ({})", term))
        })?;

        let favorite_artists: Vec<_> = artists.iter().map(Into::into).collect();
        let favorite_tracks: Vec<_> = tracks.iter().map(Into::into).collect();
        let favorite_genres = aggregate::top_genres(&favorite_artists, TOP_GENRES);
        let quirkiest_artists = aggregate::quirkiest(&favorite_artists, QUIRKIEST);

        Ok(TermSummary {
            favorite_artists,
            favorite_tracks,
            favorite_genres,
            quirkiest_artists,
        })
    }

    /// Fetches the owner's profile data and all three term windows of top
    /// items, aggregates them, and upserts the stored solo profile. Nothing
    /// is written if any fetch fails.
    pub async fn update_profile(&self, owner_id: &str) -> Result<SpotifyProfile, ReportError> {
        let credential = self.tokens.get_valid_credential(owner_id).await?;
        let token = credential.access_token;

        let profile_data = self
            .music
            .get_profile(&token)
            .await
            .ok_or_else(|| ReportError::UpstreamDataUnavailable("profile".to_string()))?;

        let (recent, medium, long) = tokio::join!(
            self.fetch_term_summary(&token, TermWindow::Recent),
            self.fetch_term_summary(&token, TermWindow::Medium),
            self.fetch_term_summary(&token, TermWindow::Long),
        );

        let profile = SpotifyProfile {
            spotify_id: profile_data.id,
            display_name: profile_data.display_name,
            email: profile_data.email,
            profile_image_url: profile_data.images.first().map(|i| i.url.clone()),
            recent: recent?,
            medium: medium?,
            long: long?,
            updated_at: Utc::now().timestamp(),
        };

        self.profiles.upsert(profile.clone()).await?;
        Ok(profile)
    }

    /// Generates and persists a solo report for one term window. `term` is
    /// the wire value (`short_term`/`medium_term`/`long_term`); anything
    /// else is rejected up front. `quirky` swaps the narrative prompt for
    /// the quirky variant.
    pub async fn solo(
        &self,
        owner_id: &str,
        term: &str,
        quirky: bool,
    ) -> Result<WrappedReport, ReportError> {
        let term = Self::validate_term(term)?;

        let credential = self.tokens.get_valid_credential(owner_id).await?;
        let token = credential.access_token;

        let summary = self.fetch_term_summary(&token, term).await?;

        let description = if quirky {
            let names: Vec<String> = summary
                .quirkiest_artists
                .iter()
                .map(|a| a.name.clone())
                .collect();
            self.narrator.describe_quirky(&names).await
        } else {
            let names: Vec<String> = summary
                .favorite_artists
                .iter()
                .map(|a| a.name.clone())
                .collect();
            self.narrator.describe(&names).await
        };

        let seeds = RecommendationSeeds {
            artists: summary
                .favorite_artists
                .iter()
                .take(SEED_ARTISTS)
                .map(|a| a.id.clone())
                .collect(),
            ..Default::default()
        };
        let song_recommendations = self
            .music
            .get_recommendations(&token, &seeds, RECOMMENDATION_LIMIT)
            .await;

        let report = WrappedReport {
            owner: owner_id.to_string(),
            peer: None,
            term,
            favorite_artists: summary.favorite_artists,
            favorite_tracks: summary.favorite_tracks,
            favorite_genres: summary.favorite_genres,
            quirkiest_artists: summary.quirkiest_artists,
            description,
            song_recommendations,
            created_at: Utc::now().timestamp(),
        };

        self.reports.append(report.clone()).await?;
        Ok(report)
    }

    /// Generates and persists a duo report. The peer must already have a
    /// stored solo profile; the owner's side is regenerated live when no
    /// cached one exists (it only needs the owner's own credential).
    pub async fn duo(
        &self,
        owner_id: &str,
        peer_id: &str,
        term: &str,
    ) -> Result<WrappedReport, ReportError> {
        let term = Self::validate_term(term)?;

        if owner_id == peer_id {
            return Err(ReportError::PeerNotFound(
                "a duo needs two different accounts".to_string(),
            ));
        }

        // peer first: cheaper than regenerating the owner's side, and no
        // external call is spent on a request that cannot succeed
        let peer_profile = self.profiles.get(peer_id).await?.ok_or_else(|| {
            ReportError::PeerNotFound(format!(
                "no stored profile for {}; run a profile update for that account first",
                peer_id
            ))
        })?;

        let owner_profile = match self.profiles.get(owner_id).await? {
            Some(profile) => profile,
            None => self.update_profile(owner_id).await?,
        };

        let own = owner_profile.term(term);
        let theirs = peer_profile.term(term);

        let favorite_artists =
            aggregate::merge_duo(&own.favorite_artists, &theirs.favorite_artists);
        let favorite_tracks = aggregate::merge_duo(&own.favorite_tracks, &theirs.favorite_tracks);
        let favorite_genres = aggregate::top_genres(&favorite_artists, TOP_GENRES);
        let quirkiest_artists = aggregate::quirkiest(&favorite_artists, QUIRKIEST);

        let own_top = own
            .favorite_artists
            .first()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| display_name_or_id(&owner_profile));
        let their_top = theirs
            .favorite_artists
            .first()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| display_name_or_id(&peer_profile));
        let description = self.narrator.compare(&own_top, &their_top).await;

        // recommendations ride on the owner's credential, best effort
        let song_recommendations = match self.tokens.get_valid_credential(owner_id).await {
            Ok(credential) => {
                let seeds = RecommendationSeeds {
                    artists: favorite_artists
                        .iter()
                        .take(SEED_ARTISTS)
                        .map(|a| a.id.clone())
                        .collect(),
                    ..Default::default()
                };
                self.music
                    .get_recommendations(&credential.access_token, &seeds, RECOMMENDATION_LIMIT)
                    .await
            }
            Err(_) => Vec::new(),
        };

        let report = WrappedReport {
            owner: owner_id.to_string(),
            peer: Some(peer_id.to_string()),
            term,
            favorite_artists,
            favorite_tracks,
            favorite_genres,
            quirkiest_artists,
            description,
            song_recommendations,
            created_at: Utc::now().timestamp(),
        };

        self.reports.append(report.clone()).await?;
        Ok(report)
    }

    /// Lists the owner's persisted snapshots, oldest first.
    pub async fn history(&self, owner_id: &str) -> Result<Vec<WrappedReport>, ReportError> {
        Ok(self.reports.history(owner_id).await?)
    }
}

fn display_name_or_id(profile: &SpotifyProfile) -> String {
    profile
        .display_name
        .clone()
        .unwrap_or_else(|| profile.spotify_id.clone())
}
