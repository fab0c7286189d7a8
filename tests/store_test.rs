mod common;

use common::{artist_summary, credential, profile_with, top_artist};
use wrappedcli::management::{
    CredentialStore, FileCredentialStore, FileProfileStore, FileReportStore, ProfileStore,
    ReportStore,
};
use wrappedcli::types::{ArtistSummary, TermSummary, TermWindow, WrappedReport};

fn sample_report(owner: &str, term: TermWindow) -> WrappedReport {
    WrappedReport {
        owner: owner.to_string(),
        peer: None,
        term,
        favorite_artists: vec![artist_summary("a1", "Alpha", 42, &["rock"])],
        favorite_tracks: Vec::new(),
        favorite_genres: vec!["rock".to_string()],
        quirkiest_artists: Vec::new(),
        description: "ROAST".to_string(),
        song_recommendations: Vec::new(),
        created_at: 1_000,
    }
}

#[tokio::test]
async fn test_credential_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::with_root(dir.path().join("credentials"));

    assert!(store.get("alice").await.unwrap().is_none());

    store.upsert(credential("alice", 12_345)).await.unwrap();
    let loaded = store.get("alice").await.unwrap().unwrap();
    assert_eq!(loaded.owner_id, "alice");
    assert_eq!(loaded.expires_at, 12_345);
    assert_eq!(loaded.refresh_token, "old-refresh");

    // upsert replaces, it never duplicates
    let mut replacement = credential("alice", 99_999);
    replacement.access_token = "new-access".to_string();
    store.upsert(replacement).await.unwrap();
    let loaded = store.get("alice").await.unwrap().unwrap();
    assert_eq!(loaded.access_token, "new-access");
    assert_eq!(loaded.expires_at, 99_999);

    store.delete("alice").await.unwrap();
    assert!(store.get("alice").await.unwrap().is_none());

    // deleting a missing row is not an error
    store.delete("alice").await.unwrap();
}

#[tokio::test]
async fn test_credential_store_current_pointer() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::with_root(dir.path().join("credentials"));

    assert!(store.current().await.unwrap().is_none());

    store.set_current("alice").await.unwrap();
    assert_eq!(store.current().await.unwrap().as_deref(), Some("alice"));

    // clearing for a different owner leaves the pointer alone
    store.clear_current_if("bob").await.unwrap();
    assert_eq!(store.current().await.unwrap().as_deref(), Some("alice"));

    store.clear_current_if("alice").await.unwrap();
    assert!(store.current().await.unwrap().is_none());
}

#[tokio::test]
async fn test_profile_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileProfileStore::with_root(dir.path().join("profiles"));

    assert!(store.get("alice").await.unwrap().is_none());

    let summary = TermSummary {
        favorite_artists: vec![ArtistSummary::from(&top_artist(
            "a1",
            "Alpha",
            42,
            &["rock"],
        ))],
        favorite_tracks: Vec::new(),
        favorite_genres: vec!["rock".to_string()],
        quirkiest_artists: Vec::new(),
    };
    store.upsert(profile_with("alice", summary)).await.unwrap();

    let loaded = store.get("alice").await.unwrap().unwrap();
    assert_eq!(loaded.spotify_id, "alice");
    assert_eq!(loaded.term(TermWindow::Recent).favorite_artists.len(), 1);
    assert_eq!(loaded.term(TermWindow::Long).favorite_genres, vec!["rock"]);
}

#[tokio::test]
async fn test_report_store_is_append_only() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileReportStore::with_root(dir.path().join("reports"));

    assert!(store.history("alice").await.unwrap().is_empty());

    store
        .append(sample_report("alice", TermWindow::Recent))
        .await
        .unwrap();
    store
        .append(sample_report("alice", TermWindow::Long))
        .await
        .unwrap();

    let history = store.history("alice").await.unwrap();
    assert_eq!(history.len(), 2);
    // order preserved: oldest first
    assert_eq!(history[0].term, TermWindow::Recent);
    assert_eq!(history[1].term, TermWindow::Long);

    // another owner's history is separate
    assert!(store.history("bob").await.unwrap().is_empty());
}
