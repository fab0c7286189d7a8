#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use wrappedcli::{
    error::{AuthError, StoreError},
    groq::Narrator,
    management::{CredentialStore, ProfileStore, ReportStore},
    spotify::{AuthorizationServer, MusicSource},
    types::{
        AlbumRef, ArtistSummary, Credential, ExternalUrls, ProfileData, RecommendationSeeds,
        RecommendedTrack, SpotifyProfile, TermSummary, TermWindow, TokenResponse, TopArtist,
        TopTrack, TrackArtist, WrappedReport,
    },
};

// ---- credential store fakes ----

pub struct MemoryCredentialStore {
    creds: Mutex<HashMap<String, Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        MemoryCredentialStore {
            creds: Mutex::new(HashMap::new()),
        }
    }

    pub fn with(credential: Credential) -> Self {
        let store = Self::new();
        store
            .creds
            .lock()
            .unwrap()
            .insert(credential.owner_id.clone(), credential);
        store
    }

    pub fn get_sync(&self, owner_id: &str) -> Option<Credential> {
        self.creds.lock().unwrap().get(owner_id).cloned()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, owner_id: &str) -> Result<Option<Credential>, StoreError> {
        Ok(self.creds.lock().unwrap().get(owner_id).cloned())
    }

    async fn upsert(&self, credential: Credential) -> Result<(), StoreError> {
        self.creds
            .lock()
            .unwrap()
            .insert(credential.owner_id.clone(), credential);
        Ok(())
    }

    async fn delete(&self, owner_id: &str) -> Result<(), StoreError> {
        self.creds.lock().unwrap().remove(owner_id);
        Ok(())
    }
}

pub struct FailingCredentialStore;

#[async_trait]
impl CredentialStore for FailingCredentialStore {
    async fn get(&self, _owner_id: &str) -> Result<Option<Credential>, StoreError> {
        Err(StoreError::Io(std::io::Error::other("store offline")))
    }

    async fn upsert(&self, _credential: Credential) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("store offline")))
    }

    async fn delete(&self, _owner_id: &str) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("store offline")))
    }
}

// ---- authorization server fake ----

pub struct FakeAuthServer {
    refresh_calls: AtomicUsize,
    delay: Duration,
    fail: bool,
    rotate_refresh_token: bool,
    expires_in: i64,
}

impl FakeAuthServer {
    pub fn new() -> Self {
        FakeAuthServer {
            refresh_calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
            fail: false,
            rotate_refresh_token: true,
            expires_in: 3600,
        }
    }

    pub fn slow(delay: Duration) -> Self {
        FakeAuthServer {
            delay,
            ..Self::new()
        }
    }

    pub fn failing() -> Self {
        FakeAuthServer {
            fail: true,
            ..Self::new()
        }
    }

    pub fn without_rotation() -> Self {
        FakeAuthServer {
            rotate_refresh_token: false,
            ..Self::new()
        }
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthorizationServer for FakeAuthServer {
    async fn exchange_code(&self, _code: &str) -> Result<TokenResponse, AuthError> {
        Ok(TokenResponse {
            access_token: "exchanged-access".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: self.expires_in,
            refresh_token: Some("exchanged-refresh".to_string()),
            scope: None,
        })
    }

    async fn refresh_access_token(&self, _refresh_token: &str) -> Result<TokenResponse, AuthError> {
        let call = self.refresh_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(AuthError::Refresh("upstream said no".to_string()));
        }

        Ok(TokenResponse {
            access_token: format!("refreshed-access-{}", call),
            token_type: "Bearer".to_string(),
            expires_in: self.expires_in,
            refresh_token: if self.rotate_refresh_token {
                Some(format!("refreshed-refresh-{}", call))
            } else {
                None
            },
            scope: None,
        })
    }
}

// ---- music source fake ----

pub struct FakeMusicSource {
    profile: Option<ProfileData>,
    artists: Option<Vec<TopArtist>>,
    tracks: Option<Vec<TopTrack>>,
    recommendations: Vec<RecommendedTrack>,
    calls: AtomicUsize,
}

impl FakeMusicSource {
    pub fn new(artists: Vec<TopArtist>, tracks: Vec<TopTrack>) -> Self {
        FakeMusicSource {
            profile: Some(ProfileData {
                id: "owner".to_string(),
                display_name: Some("Owner".to_string()),
                email: None,
                images: Vec::new(),
            }),
            artists: Some(artists),
            tracks: Some(tracks),
            recommendations: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        FakeMusicSource {
            profile: None,
            artists: None,
            tracks: None,
            recommendations: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_recommendations(mut self, recommendations: Vec<RecommendedTrack>) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MusicSource for FakeMusicSource {
    async fn get_profile(&self, _token: &str) -> Option<ProfileData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.profile.clone()
    }

    async fn get_top_artists(
        &self,
        _token: &str,
        _term: TermWindow,
        _limit: u32,
    ) -> Option<Vec<TopArtist>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.artists.clone()
    }

    async fn get_top_tracks(
        &self,
        _token: &str,
        _term: TermWindow,
        _limit: u32,
    ) -> Option<Vec<TopTrack>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tracks.clone()
    }

    async fn get_recommendations(
        &self,
        _token: &str,
        _seeds: &RecommendationSeeds,
        _limit: u32,
    ) -> Vec<RecommendedTrack> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.recommendations.clone()
    }
}

// ---- narrator fake ----

pub struct CannedNarrator;

#[async_trait]
impl Narrator for CannedNarrator {
    async fn describe(&self, _favorite_artists: &[String]) -> String {
        "ROAST".to_string()
    }

    async fn describe_quirky(&self, _quirkiest_artists: &[String]) -> String {
        "QUIRKY ROAST".to_string()
    }

    async fn compare(&self, artist_1: &str, artist_2: &str) -> String {
        format!("{} vs {}", artist_1, artist_2)
    }
}

// ---- profile / report store fakes ----

pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<String, SpotifyProfile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        MemoryProfileStore {
            profiles: Mutex::new(HashMap::new()),
        }
    }

    pub fn with(profile: SpotifyProfile) -> Self {
        let store = Self::new();
        store
            .profiles
            .lock()
            .unwrap()
            .insert(profile.spotify_id.clone(), profile);
        store
    }

    pub fn insert(&self, profile: SpotifyProfile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.spotify_id.clone(), profile);
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, spotify_id: &str) -> Result<Option<SpotifyProfile>, StoreError> {
        Ok(self.profiles.lock().unwrap().get(spotify_id).cloned())
    }

    async fn upsert(&self, profile: SpotifyProfile) -> Result<(), StoreError> {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.spotify_id.clone(), profile);
        Ok(())
    }
}

pub struct MemoryReportStore {
    reports: Mutex<Vec<WrappedReport>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        MemoryReportStore {
            reports: Mutex::new(Vec::new()),
        }
    }

    pub fn append_count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn append(&self, report: WrappedReport) -> Result<(), StoreError> {
        self.reports.lock().unwrap().push(report);
        Ok(())
    }

    async fn history(&self, owner_id: &str) -> Result<Vec<WrappedReport>, StoreError> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|report| report.owner == owner_id)
            .cloned()
            .collect())
    }
}

// ---- builders ----

pub fn credential(owner_id: &str, expires_at: i64) -> Credential {
    Credential {
        owner_id: owner_id.to_string(),
        access_token: "old-access".to_string(),
        refresh_token: "old-refresh".to_string(),
        token_kind: "Bearer".to_string(),
        expires_at,
        created_at: 1_000,
    }
}

pub fn top_artist(id: &str, name: &str, popularity: u32, genres: &[&str]) -> TopArtist {
    TopArtist {
        id: id.to_string(),
        name: name.to_string(),
        popularity,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        images: Vec::new(),
    }
}

pub fn top_track(id: &str, name: &str, artist: &str) -> TopTrack {
    TopTrack {
        id: id.to_string(),
        name: name.to_string(),
        popularity: 50,
        artists: vec![TrackArtist {
            id: format!("{}-artist", id),
            name: artist.to_string(),
        }],
        album: AlbumRef {
            name: format!("{} album", name),
            images: Vec::new(),
        },
        preview_url: None,
        external_urls: ExternalUrls::default(),
    }
}

pub fn artist_summary(id: &str, name: &str, popularity: u32, genres: &[&str]) -> ArtistSummary {
    ArtistSummary {
        id: id.to_string(),
        name: name.to_string(),
        popularity,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        image_url: None,
    }
}

pub fn profile_with(spotify_id: &str, summary: TermSummary) -> SpotifyProfile {
    SpotifyProfile {
        spotify_id: spotify_id.to_string(),
        display_name: Some(format!("{} display", spotify_id)),
        email: None,
        profile_image_url: None,
        recent: summary.clone(),
        medium: summary.clone(),
        long: summary,
        updated_at: 1_000,
    }
}
