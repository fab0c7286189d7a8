use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{
    spotify::{AuthorizationServer, SpotifyAccounts},
    types::OauthExchange,
    warning,
};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<OauthExchange>>>>,
) -> Html<&'static str> {
    let Some(code) = params.get("code") else {
        return Html("<h4>Missing code parameter.</h4>");
    };

    let mut state = shared_state.lock().await;
    let Some(ref mut exchange) = state.as_mut() else {
        return Html("<h4>No authorization flow in progress.</h4>");
    };

    // the state parameter ties this redirect to the flow we started
    if params.get("state") != Some(&exchange.state) {
        warning!("OAuth callback carried an unexpected state parameter.");
        return Html("<h4>State mismatch. Please restart the login.</h4>");
    }

    match SpotifyAccounts::new().exchange_code(code).await {
        Ok(token) => {
            exchange.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
