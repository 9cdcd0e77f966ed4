//! Distance and relevance scoring.
//!
//! Relevance is relative to the candidate set of a single query:
//! `relevance = 1 - distance / max_distance`, so the farthest candidate
//! scores 0 and a candidate sitting on the reference scores 1. When every
//! candidate sits on the reference there is no spread to normalize by and
//! every candidate scores 1.

use galaxy_core::{Point, Track};

use crate::distance::euclidean;

/// A track with its distance to the reference and derived relevance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub track: &'a Track,
    pub distance: f64,
    pub relevance: f64,
}

/// Score every candidate against `reference`, keeping input order.
pub fn score<'a, I>(reference: Point, candidates: I) -> Vec<ScoredCandidate<'a>>
where
    I: IntoIterator<Item = &'a Track>,
{
    let distances: Vec<(&Track, f64)> = candidates
        .into_iter()
        .map(|track| (track, euclidean(reference, track.position)))
        .collect();
    let max_distance = distances.iter().map(|(_, d)| *d).fold(0.0, f64::max);

    distances
        .into_iter()
        .map(|(track, distance)| ScoredCandidate {
            track,
            distance,
            relevance: relevance(distance, max_distance),
        })
        .collect()
}

/// Normalize a distance against the farthest distance of its query.
#[must_use]
pub fn relevance(distance: f64, max_distance: f64) -> f64 {
    if max_distance > 0.0 {
        (1.0 - distance / max_distance).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// Rank the nearest `count` candidates to `reference`.
///
/// Relevance is normalized over all candidates (the reference included)
/// before the reference is dropped by id. Equal distances keep their input
/// order.
pub fn recommend<'a, I>(reference: &Track, candidates: I, count: usize) -> Vec<ScoredCandidate<'a>>
where
    I: IntoIterator<Item = &'a Track>,
{
    let mut ranked = score(reference.position, candidates);
    ranked.retain(|c| c.track.id != reference.id);
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked.truncate(count);

    log::debug!(
        "Ranked {} recommendations for {} ({})",
        ranked.len(),
        reference.id,
        reference.name
    );
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn abc() -> Vec<Track> {
        vec![
            Track::new("A", "Alpha", "One", "techno", 50, (0.0, 0.0)),
            Track::new("B", "Beta", "Two", "techno", 50, (3.0, 4.0)),
            Track::new("C", "Gamma", "Three", "techno", 50, (6.0, 8.0)),
        ]
    }

    #[test]
    fn test_worked_example() {
        let tracks = abc();
        let ranked = recommend(&tracks[0], &tracks, 10);

        let ids: Vec<&str> = ranked.iter().map(|c| c.track.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C"]);
        assert!((ranked[0].distance - 5.0).abs() < 1e-12);
        assert!((ranked[1].distance - 10.0).abs() < 1e-12);
        assert!((ranked[0].relevance - 0.5).abs() < 1e-12);
        assert_eq!(ranked[1].relevance, 0.0);
    }

    #[test]
    fn test_score_keeps_reference_at_full_relevance() {
        let tracks = abc();
        let scored = score(tracks[0].position, &tracks);
        assert_eq!(scored[0].distance, 0.0);
        assert_eq!(scored[0].relevance, 1.0);
    }

    #[test]
    fn test_reference_excluded_by_id_not_position() {
        let tracks = vec![
            Track::new("A", "Alpha", "One", "techno", 50, (1.0, 1.0)),
            Track::new("twin", "Alpha (Remix)", "One", "techno", 50, (1.0, 1.0)),
            Track::new("far", "Far", "Two", "techno", 50, (4.0, 5.0)),
        ];
        let ranked = recommend(&tracks[0], &tracks, 10);
        let ids: Vec<&str> = ranked.iter().map(|c| c.track.id.as_str()).collect();
        assert_eq!(ids, vec!["twin", "far"]);
        assert_eq!(ranked[0].relevance, 1.0);
    }

    #[test]
    fn test_coincident_candidates_all_fully_relevant() {
        let tracks = vec![
            Track::new("A", "Alpha", "One", "techno", 50, (2.0, 2.0)),
            Track::new("B", "Beta", "Two", "techno", 50, (2.0, 2.0)),
            Track::new("C", "Gamma", "Three", "techno", 50, (2.0, 2.0)),
        ];
        let ranked = recommend(&tracks[0], &tracks, 10);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|c| c.relevance == 1.0 && c.distance == 0.0));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let tracks = vec![
            Track::new("ref", "Ref", "X", "techno", 50, (0.0, 0.0)),
            Track::new("east", "East", "X", "techno", 50, (1.0, 0.0)),
            Track::new("far", "Far", "X", "techno", 50, (9.0, 0.0)),
            Track::new("north", "North", "X", "techno", 50, (0.0, 1.0)),
            Track::new("west", "West", "X", "techno", 50, (-1.0, 0.0)),
        ];
        let ranked = recommend(&tracks[0], &tracks, 10);
        let ids: Vec<&str> = ranked.iter().map(|c| c.track.id.as_str()).collect();
        assert_eq!(ids, vec!["east", "north", "west", "far"]);
    }

    #[test]
    fn test_truncates_to_count() {
        let tracks = abc();
        assert_eq!(recommend(&tracks[0], &tracks, 1).len(), 1);
        assert!(recommend(&tracks[0], &tracks, 0).is_empty());
    }

    #[test]
    fn test_single_track_has_no_recommendations() {
        let tracks = vec![Track::new("A", "Alpha", "One", "techno", 50, (0.0, 0.0))];
        assert!(recommend(&tracks[0], &tracks, 5).is_empty());
    }

    fn arb_tracks() -> impl Strategy<Value = Vec<Track>> {
        prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 1..40).prop_map(|coords| {
            coords
                .into_iter()
                .enumerate()
                .map(|(i, (x, y))| Track::new(format!("t{i}").as_str(), "Song", "Artist", "techno", 50, (x, y)))
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_distances_non_negative_and_relevance_bounded(
            tracks in arb_tracks(),
            pick in any::<prop::sample::Index>(),
        ) {
            let reference = &tracks[pick.index(tracks.len())];
            let scored = score(reference.position, &tracks);
            for candidate in &scored {
                prop_assert!(candidate.distance >= 0.0);
                prop_assert!((0.0..=1.0).contains(&candidate.relevance));
                if candidate.track.id == reference.id {
                    prop_assert_eq!(candidate.distance, 0.0);
                    prop_assert_eq!(candidate.relevance, 1.0);
                }
            }
        }

        #[test]
        fn prop_farthest_candidate_has_zero_relevance(
            tracks in arb_tracks(),
            pick in any::<prop::sample::Index>(),
        ) {
            let reference = &tracks[pick.index(tracks.len())];
            let scored = score(reference.position, &tracks);
            let max = scored.iter().map(|c| c.distance).fold(0.0, f64::max);
            if max > 0.0 {
                for candidate in scored.iter().filter(|c| c.distance == max) {
                    prop_assert!(candidate.relevance.abs() < 1e-12);
                }
            }
        }

        #[test]
        fn prop_ranking_is_monotonic_and_excludes_reference(
            tracks in arb_tracks(),
            pick in any::<prop::sample::Index>(),
            count in 0usize..50,
        ) {
            let reference = &tracks[pick.index(tracks.len())];
            let ranked = recommend(reference, &tracks, count);
            prop_assert!(ranked.len() <= count.min(tracks.len() - 1));
            prop_assert!(ranked.iter().all(|c| c.track.id != reference.id));
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].distance <= pair[1].distance);
                prop_assert!(pair[0].relevance >= pair[1].relevance);
            }
        }

        #[test]
        fn prop_recommend_is_idempotent(
            tracks in arb_tracks(),
            pick in any::<prop::sample::Index>(),
        ) {
            let reference = &tracks[pick.index(tracks.len())];
            let first = recommend(reference, &tracks, tracks.len());
            let second = recommend(reference, &tracks, tracks.len());
            prop_assert_eq!(first, second);
        }
    }
}
