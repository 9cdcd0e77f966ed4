use galaxy_core::Track;

/// Lowercased, trimmed search text, or `None` for a blank query.
#[must_use]
pub fn normalize(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Tracks whose name contains `query`, ignoring case, in view order.
///
/// The query is literal text. A blank query matches nothing.
pub fn find_matches<'a>(tracks: &[&'a Track], query: &str) -> Vec<&'a Track> {
    let Some(needle) = normalize(query) else {
        return Vec::new();
    };

    tracks
        .iter()
        .copied()
        .filter(|track| track.name.to_lowercase().contains(&needle))
        .collect()
}
