use std::sync::Arc;

use tabled::Table;

use crate::{
    cli, error, info,
    management::{FileCredentialStore, FileReportStore, ReportStore},
    success,
    types::{ReportTableRow, TermSummary, TermWindow, WrappedReport},
    utils,
};

pub async fn create_wrapped(user: Option<String>, term: TermWindow, quirky: bool) {
    let (store, assembler) = cli::build_assembler();
    let owner = cli::resolve_owner(user, &store).await;

    let pb = cli::spinner("Generating your Wrapped report...");
    let result = assembler.solo(&owner, term.wire_value(), quirky).await;
    pb.finish_and_clear();

    match result {
        Ok(report) => {
            success!("Wrapped report for {} ({}) saved.", report.owner, term);
            print_report(&report);
        }
        Err(e) => {
            error!("{}", cli::report_error_message(&e));
        }
    }
}

pub async fn wrapped_history(user: Option<String>) {
    let store = Arc::new(FileCredentialStore::new());
    let owner = cli::resolve_owner(user, &store).await;

    let reports = FileReportStore::new();
    match reports.history(&owner).await {
        Ok(history) if history.is_empty() => {
            info!("No past reports for {}.", owner);
        }
        Ok(history) => {
            let rows: Vec<ReportTableRow> = history
                .iter()
                .map(|report| ReportTableRow {
                    created: utils::format_timestamp(report.created_at),
                    term: report.term.to_string(),
                    with: report.peer.clone().unwrap_or_else(|| "-".to_string()),
                    top_artist: report
                        .favorite_artists
                        .first()
                        .map(|a| a.name.clone())
                        .unwrap_or_else(|| "-".to_string()),
                    top_genre: report
                        .favorite_genres
                        .first()
                        .cloned()
                        .unwrap_or_else(|| "-".to_string()),
                })
                .collect();

            println!("{}", Table::new(rows));
        }
        Err(e) => {
            error!("Failed to load report history: {}", e);
        }
    }
}

pub(crate) fn print_report(report: &WrappedReport) {
    cli::print_term_summary(&TermSummary {
        favorite_artists: report.favorite_artists.clone(),
        favorite_tracks: report.favorite_tracks.clone(),
        favorite_genres: report.favorite_genres.clone(),
        quirkiest_artists: report.quirkiest_artists.clone(),
    });

    info!("The verdict:");
    println!("{}", report.description);

    if !report.song_recommendations.is_empty() {
        info!("Songs you might like:");
        for track in &report.song_recommendations {
            println!("  - {} by {} ({})", track.name, track.artist, track.album);
        }
    }
}
