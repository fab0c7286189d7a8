use std::sync::Arc;

use crate::{
    cli, error, info,
    management::{FileCredentialStore, FileProfileStore, ProfileStore},
    success,
    types::TermWindow,
    utils, warning,
};

pub async fn update_profile(user: Option<String>) {
    let (store, assembler) = cli::build_assembler();
    let owner = cli::resolve_owner(user, &store).await;

    let pb = cli::spinner("Fetching listening profile...");
    let result = assembler.update_profile(&owner).await;
    pb.finish_and_clear();

    match result {
        Ok(profile) => {
            let name = profile.display_name.unwrap_or(profile.spotify_id);
            success!("Listening profile for {} updated.", name);
        }
        Err(e) => {
            error!("{}", cli::report_error_message(&e));
        }
    }
}

pub async fn show_profile(user: Option<String>, term: TermWindow) {
    let store = Arc::new(FileCredentialStore::new());
    let owner = cli::resolve_owner(user, &store).await;

    let profiles = FileProfileStore::new();
    match profiles.get(&owner).await {
        Ok(Some(profile)) => {
            let name = profile
                .display_name
                .clone()
                .unwrap_or_else(|| profile.spotify_id.clone());
            info!(
                "Listening profile for {} ({}), updated {}:",
                name,
                term,
                utils::format_timestamp(profile.updated_at)
            );
            cli::print_term_summary(profile.term(term));
        }
        Ok(None) => {
            warning!(
                "No cached profile for {}. Run wrappedcli profile update first.",
                owner
            );
        }
        Err(e) => {
            error!("Failed to load profile: {}", e);
        }
    }
}
