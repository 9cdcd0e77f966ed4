//! The search-then-recommend flow as explicit states.
//!
//! A query over a filtered view ends in exactly one [`Outcome`]. The
//! empty-view check runs first, so nothing is searched or scored when the
//! filters leave no tracks.

use galaxy_core::Track;

use crate::count::CountOptions;
use crate::query::{find_matches, normalize};
use crate::scorer::{recommend, ScoredCandidate};

/// What the caller asked for.
#[derive(Debug, Clone, Copy)]
pub struct Request<'q> {
    /// Free-text song name search.
    pub query: &'q str,
    /// Index into the match list; clamped to the last match.
    pub pick: usize,
    /// Requested number of recommendations; snapped to an offered count.
    pub count: Option<usize>,
    /// Largest count offered.
    pub max_recommendations: usize,
}

/// Result of running a [`Request`] against a filtered view.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<'a> {
    /// The filters leave no tracks.
    EmptyFilter,
    /// No search text was given.
    NoQueryEntered,
    /// Search text was given but no track name contains it.
    NoMatchesFound { query: String },
    Recommendations(Recommendations<'a>),
}

/// A resolved track and its ranked neighbors.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations<'a> {
    /// Every track whose name matched, in view order. Never empty.
    pub matches: Vec<&'a Track>,
    /// Index of `selected` within `matches`.
    pub pick: usize,
    pub selected: &'a Track,
    pub counts: CountOptions,
    /// Count actually used for `ranked`.
    pub count: usize,
    pub ranked: Vec<ScoredCandidate<'a>>,
}

pub const EMPTY_FILTER_MESSAGE: &str = "No tracks available with the selected filters. \
     Please adjust your genre selection or popularity range.";
pub const NO_QUERY_MESSAGE: &str = "Type a song name to get recommendations.";
pub const NO_MATCHES_MESSAGE: &str = "No songs found with that name.";

impl Outcome<'_> {
    /// User-facing text for the non-result states.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::EmptyFilter => Some(EMPTY_FILTER_MESSAGE),
            Self::NoQueryEntered => Some(NO_QUERY_MESSAGE),
            Self::NoMatchesFound { .. } => Some(NO_MATCHES_MESSAGE),
            Self::Recommendations(_) => None,
        }
    }
}

/// Search `filtered` for `request.query`, pick a match and rank its
/// neighbors within the same view.
pub fn recommend_for_query<'a>(filtered: &[&'a Track], request: &Request<'_>) -> Outcome<'a> {
    if filtered.is_empty() {
        return Outcome::EmptyFilter;
    }
    if normalize(request.query).is_none() {
        return Outcome::NoQueryEntered;
    }

    let matches = find_matches(filtered, request.query);
    let Some(last) = matches.len().checked_sub(1) else {
        return Outcome::NoMatchesFound {
            query: request.query.trim().to_string(),
        };
    };

    let pick = request.pick.min(last);
    let selected = matches[pick];
    let counts = CountOptions::new(filtered.len(), request.max_recommendations);
    let count = counts.resolve(request.count);
    let ranked = recommend(selected, filtered.iter().copied(), count);

    Outcome::Recommendations(Recommendations {
        matches,
        pick,
        selected,
        counts,
        count,
        ranked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks() -> Vec<Track> {
        vec![
            Track::new("a", "Alpha", "One", "techno", 50, (0.0, 0.0)),
            Track::new("b", "Beta", "Two", "techno", 50, (3.0, 4.0)),
            Track::new("c", "Gamma", "Three", "techno", 50, (6.0, 8.0)),
            Track::new("a2", "Alpha", "Other One", "house", 50, (6.0, 8.0)),
        ]
    }

    fn request(query: &str) -> Request<'_> {
        Request {
            query,
            pick: 0,
            count: None,
            max_recommendations: 100,
        }
    }

    #[test]
    fn test_empty_filter_checked_first() {
        let outcome = recommend_for_query(&[], &request("alpha"));
        assert_eq!(outcome, Outcome::EmptyFilter);
        assert!(outcome.message().unwrap().starts_with("No tracks available"));
    }

    #[test]
    fn test_no_query_and_no_matches_are_distinct() {
        let tracks = tracks();
        let view: Vec<&Track> = tracks.iter().collect();

        let blank = recommend_for_query(&view, &request("  "));
        assert_eq!(blank, Outcome::NoQueryEntered);

        let missing = recommend_for_query(&view, &request("omega"));
        assert_eq!(
            missing,
            Outcome::NoMatchesFound {
                query: "omega".to_string()
            }
        );
        assert_ne!(blank.message(), missing.message());
    }

    #[test]
    fn test_recommendations_for_first_match() {
        let tracks = tracks();
        let view: Vec<&Track> = tracks.iter().collect();

        let Outcome::Recommendations(recs) = recommend_for_query(&view, &request("alp")) else {
            panic!("expected recommendations");
        };
        assert_eq!(recs.matches.len(), 2);
        assert_eq!(recs.selected.id.as_str(), "a");
        // Three candidates remain: too few for a step of five.
        assert!(recs.counts.options().is_empty());
        assert_eq!(recs.count, 3);
        let ids: Vec<&str> = recs.ranked.iter().map(|c| c.track.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a2"]);
    }

    #[test]
    fn test_duplicate_names_pick_exact_track() {
        let tracks = tracks();
        let view: Vec<&Track> = tracks.iter().collect();
        let req = Request {
            pick: 1,
            ..request("alpha")
        };

        let Outcome::Recommendations(recs) = recommend_for_query(&view, &req) else {
            panic!("expected recommendations");
        };
        assert_eq!(recs.selected.id.as_str(), "a2");
        assert!(recs.ranked.iter().all(|c| c.track.id.as_str() != "a2"));
        // "c" shares a2's coordinates.
        assert_eq!(recs.ranked[0].track.id.as_str(), "c");
        assert_eq!(recs.ranked[0].relevance, 1.0);
    }

    #[test]
    fn test_pick_clamped_to_last_match() {
        let tracks = tracks();
        let view: Vec<&Track> = tracks.iter().collect();
        let req = Request {
            pick: 99,
            ..request("beta")
        };

        let Outcome::Recommendations(recs) = recommend_for_query(&view, &req) else {
            panic!("expected recommendations");
        };
        assert_eq!(recs.pick, 0);
        assert_eq!(recs.selected.id.as_str(), "b");
    }

    #[test]
    fn test_single_track_view_has_nothing_to_recommend() {
        let tracks = tracks();
        let view: Vec<&Track> = tracks.iter().take(1).collect();

        let Outcome::Recommendations(recs) = recommend_for_query(&view, &request("alpha")) else {
            panic!("expected recommendations");
        };
        assert_eq!(recs.count, 0);
        assert!(recs.ranked.is_empty());
    }
}
