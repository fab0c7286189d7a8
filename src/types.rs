use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TermWindow {
    /// Roughly the last 4 weeks
    Recent,
    /// Roughly the last 6 months
    Medium,
    /// Roughly the last year
    Long,
}

impl TermWindow {
    pub const ALL: [TermWindow; 3] = [TermWindow::Recent, TermWindow::Medium, TermWindow::Long];

    pub fn wire_value(&self) -> &'static str {
        match self {
            TermWindow::Recent => "short_term",
            TermWindow::Medium => "medium_term",
            TermWindow::Long => "long_term",
        }
    }

    pub fn from_wire(value: &str) -> Option<TermWindow> {
        match value {
            "short_term" => Some(TermWindow::Recent),
            "medium_term" => Some(TermWindow::Medium),
            "long_term" => Some(TermWindow::Long),
            _ => None,
        }
    }
}

impl std::fmt::Display for TermWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_value())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub owner_id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token_kind: String,
    pub expires_at: i64,
    pub created_at: i64,
}

impl Credential {
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OauthExchange {
    pub state: String,
    pub token: Option<TokenResponse>,
}

#[derive(Debug, Clone, Default)]
pub struct RecommendationSeeds {
    pub artists: Vec<String>,
    pub tracks: Vec<String>,
    pub genres: Vec<String>,
}

impl RecommendationSeeds {
    pub fn is_empty(&self) -> bool {
        self.artists.is_empty() && self.tracks.is_empty() && self.genres.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileData {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopItemsResponse<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopArtist {
    pub id: String,
    pub name: String,
    pub popularity: u32,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTrack {
    pub id: String,
    pub name: String,
    pub popularity: u32,
    pub artists: Vec<TrackArtist>,
    pub album: AlbumRef,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<TopTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedTrack {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub preview_url: Option<String>,
    pub external_url: Option<String>,
}

impl From<&TopTrack> for RecommendedTrack {
    fn from(track: &TopTrack) -> Self {
        RecommendedTrack {
            id: track.id.clone(),
            name: track.name.clone(),
            artist: track
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            album: track.album.name.clone(),
            preview_url: track.preview_url.clone(),
            external_url: track.external_urls.spotify.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    pub popularity: u32,
    pub genres: Vec<String>,
    pub image_url: Option<String>,
}

impl From<&TopArtist> for ArtistSummary {
    fn from(artist: &TopArtist) -> Self {
        ArtistSummary {
            id: artist.id.clone(),
            name: artist.name.clone(),
            popularity: artist.popularity,
            genres: artist.genres.clone(),
            image_url: artist.images.first().map(|i| i.url.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    pub artists: String,
    pub album: String,
    pub image_url: Option<String>,
}

impl From<&TopTrack> for TrackSummary {
    fn from(track: &TopTrack) -> Self {
        TrackSummary {
            id: track.id.clone(),
            name: track.name.clone(),
            artists: track
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            album: track.album.name.clone(),
            image_url: track.album.images.first().map(|i| i.url.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermSummary {
    pub favorite_artists: Vec<ArtistSummary>,
    pub favorite_tracks: Vec<TrackSummary>,
    pub favorite_genres: Vec<String>,
    pub quirkiest_artists: Vec<ArtistSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyProfile {
    pub spotify_id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub profile_image_url: Option<String>,
    pub recent: TermSummary,
    pub medium: TermSummary,
    pub long: TermSummary,
    pub updated_at: i64,
}

impl SpotifyProfile {
    pub fn term(&self, term: TermWindow) -> &TermSummary {
        match term {
            TermWindow::Recent => &self.recent,
            TermWindow::Medium => &self.medium,
            TermWindow::Long => &self.long,
        }
    }

    pub fn term_mut(&mut self, term: TermWindow) -> &mut TermSummary {
        match term {
            TermWindow::Recent => &mut self.recent,
            TermWindow::Medium => &mut self.medium,
            TermWindow::Long => &mut self.long,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrappedReport {
    pub owner: String,
    pub peer: Option<String>,
    pub term: TermWindow,
    pub favorite_artists: Vec<ArtistSummary>,
    pub favorite_tracks: Vec<TrackSummary>,
    pub favorite_genres: Vec<String>,
    pub quirkiest_artists: Vec<ArtistSummary>,
    pub description: String,
    pub song_recommendations: Vec<RecommendedTrack>,
    pub created_at: i64,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub rank: usize,
    pub name: String,
    pub popularity: u32,
    pub genres: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub rank: usize,
    pub name: String,
    pub artists: String,
    pub album: String,
}

#[derive(Tabled)]
pub struct ReportTableRow {
    pub created: String,
    pub term: String,
    pub with: String,
    pub top_artist: String,
    pub top_genre: String,
}
