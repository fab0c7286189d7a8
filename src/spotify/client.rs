use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config,
    types::{
        ProfileData, RecommendationSeeds, RecommendationsResponse, RecommendedTrack, TermWindow,
        TopArtist, TopItemsResponse, TopTrack,
    },
    utils,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The provider caps top-item queries at 50 results per request. Anything
/// larger is clamped here instead of passed through.
pub const MAX_TOP_ITEMS: u32 = 50;

/// Bearer-authenticated read access to the external music data API.
///
/// Every method takes a live access token obtained from the token lifecycle
/// manager; nothing here reads or refreshes credentials. Failures never
/// raise past this layer: callers get `None` (or an empty list for
/// recommendations) and decide for themselves whether that aborts their
/// pipeline.
#[async_trait]
pub trait MusicSource: Send + Sync {
    async fn get_profile(&self, token: &str) -> Option<ProfileData>;
    async fn get_top_artists(
        &self,
        token: &str,
        term: TermWindow,
        limit: u32,
    ) -> Option<Vec<TopArtist>>;
    async fn get_top_tracks(
        &self,
        token: &str,
        term: TermWindow,
        limit: u32,
    ) -> Option<Vec<TopTrack>>;
    async fn get_recommendations(
        &self,
        token: &str,
        seeds: &RecommendationSeeds,
        limit: u32,
    ) -> Vec<RecommendedTrack>;
}

/// Production [`MusicSource`] against the Spotify Web API.
///
/// All requests are bounded by a 5 second timeout and are never retried; a
/// non-2xx status, a timeout, or an unexpected response shape classifies as
/// "no data" rather than an error.
pub struct SpotifyClient {
    http: Client,
}

impl SpotifyClient {
    pub fn new() -> Self {
        SpotifyClient {
            http: Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str, token: &str) -> Option<T> {
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            return None;
        }

        response.json::<T>().await.ok()
    }
}

impl Default for SpotifyClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MusicSource for SpotifyClient {
    /// Retrieves the current user's profile: Spotify id, display name,
    /// email, and avatar. The id is the stable identity key credentials and
    /// reports are stored under.
    async fn get_profile(&self, token: &str) -> Option<ProfileData> {
        let api_url = format!("{}/me", config::spotify_apiurl());
        self.get_json(&api_url, token).await
    }

    /// Retrieves the user's top artists for one term window, most played
    /// first as ranked by the provider.
    async fn get_top_artists(
        &self,
        token: &str,
        term: TermWindow,
        limit: u32,
    ) -> Option<Vec<TopArtist>> {
        let api_url = format!(
            "{uri}/me/top/artists?time_range={range}&limit={limit}",
            uri = config::spotify_apiurl(),
            range = term.wire_value(),
            limit = limit.clamp(1, MAX_TOP_ITEMS),
        );
        self.get_json::<TopItemsResponse<TopArtist>>(&api_url, token)
            .await
            .map(|response| response.items)
    }

    /// Retrieves the user's top tracks for one term window.
    async fn get_top_tracks(
        &self,
        token: &str,
        term: TermWindow,
        limit: u32,
    ) -> Option<Vec<TopTrack>> {
        let api_url = format!(
            "{uri}/me/top/tracks?time_range={range}&limit={limit}",
            uri = config::spotify_apiurl(),
            range = term.wire_value(),
            limit = limit.clamp(1, MAX_TOP_ITEMS),
        );
        self.get_json::<TopItemsResponse<TopTrack>>(&api_url, token)
            .await
            .map(|response| response.items)
    }

    /// Fetches seeded track recommendations. Recommendations are a nice to
    /// have: an empty seed set or any provider failure yields an empty list
    /// and never aborts report generation.
    async fn get_recommendations(
        &self,
        token: &str,
        seeds: &RecommendationSeeds,
        limit: u32,
    ) -> Vec<RecommendedTrack> {
        if seeds.is_empty() {
            return Vec::new();
        }

        let mut api_url = format!(
            "{uri}/recommendations?limit={limit}",
            uri = config::spotify_apiurl(),
            limit = limit,
        );
        if !seeds.artists.is_empty() {
            api_url.push_str(&format!("&seed_artists={}", utils::join_seeds(&seeds.artists)));
        }
        if !seeds.tracks.is_empty() {
            api_url.push_str(&format!("&seed_tracks={}", utils::join_seeds(&seeds.tracks)));
        }
        if !seeds.genres.is_empty() {
            api_url.push_str(&format!("&seed_genres={}", utils::join_seeds(&seeds.genres)));
        }

        match self
            .get_json::<RecommendationsResponse>(&api_url, token)
            .await
        {
            Some(response) => response.tracks.iter().map(RecommendedTrack::from).collect(),
            None => Vec::new(),
        }
    }
}
