use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::DateTime;
use rand::RngCore;

pub fn generate_state() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn join_seeds(ids: &[String]) -> String {
    ids.join(",")
}

pub fn format_genres(genres: &[String], max: usize) -> String {
    let mut shown: Vec<&str> = genres.iter().take(max).map(String::as_str).collect();
    if genres.len() > max {
        shown.push("...");
    }
    shown.join(", ")
}

pub fn format_timestamp(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
