use std::{cmp::Reverse, collections::HashMap};

use crate::types::ArtistSummary;

/// Number of genres a report keeps.
pub const TOP_GENRES: usize = 3;

/// Number of quirkiest artists a report keeps.
pub const QUIRKIEST: usize = 5;

/// Flattens every artist's genre tags, counts occurrences, and returns the
/// `k` most frequent genres. Equal counts keep the order genres were first
/// encountered while scanning the input, so the result is reproducible for
/// a fixed input sequence.
pub fn top_genres(artists: &[ArtistSummary], k: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for artist in artists {
        for genre in &artist.genres {
            let count = counts.entry(genre.as_str()).or_insert(0);
            if *count == 0 {
                order.push(genre.as_str());
            }
            *count += 1;
        }
    }

    // stable sort: ties keep first-seen order
    order.sort_by_key(|genre| Reverse(counts[genre]));
    order.into_iter().take(k).map(str::to_string).collect()
}

/// Returns the `k` artists with the lowest popularity, lowest first. Equal
/// popularity keeps the original input order.
pub fn quirkiest(artists: &[ArtistSummary], k: usize) -> Vec<ArtistSummary> {
    let mut sorted = artists.to_vec();
    sorted.sort_by_key(|artist| artist.popularity);
    sorted.truncate(k);
    sorted
}

/// Concatenates two users' lists for a duo report, `a`'s items first. No
/// dedup and no re-ranking; a duo report shows the union of both tastes.
pub fn merge_duo<T: Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    merged.extend_from_slice(a);
    merged.extend_from_slice(b);
    merged
}
