//! The in-memory catalog of tracks.
//!
//! A [`Catalog`] is built once from an artifact (see [`artifact`]) and is
//! read-only afterwards. Construction validates every row, so code holding
//! a `Catalog` can rely on unique ids, popularity within 0-100 and finite
//! coordinates.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{Bounds, Track, TrackId, MAX_POPULARITY};

pub mod artifact;
pub mod shared;

pub use artifact::{ArtifactFormat, COLUMNS};

/// Ordered, validated collection of tracks.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<Track>,
    index: HashMap<TrackId, usize>,
}

/// Number of tracks carrying a given genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCount {
    pub genre: String,
    pub tracks: usize,
}

/// Aggregate figures about a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub track_count: usize,
    pub genres: Vec<GenreCount>,
    /// Lowest and highest popularity, if the catalog is non-empty.
    pub popularity: Option<(u8, u8)>,
    pub bounds: Option<Bounds>,
}

impl Catalog {
    /// Build a catalog, keeping the given order.
    ///
    /// Fails on duplicate ids, popularity above 100 or non-finite
    /// coordinates.
    pub fn from_tracks(tracks: Vec<Track>) -> Result<Self> {
        let mut index = HashMap::with_capacity(tracks.len());

        for (position, track) in tracks.iter().enumerate() {
            if track.popularity > MAX_POPULARITY {
                return Err(Error::InvalidData(format!(
                    "track {} has popularity {}, expected 0-{}",
                    track.id, track.popularity, MAX_POPULARITY
                )));
            }
            if !track.position.is_finite() {
                return Err(Error::InvalidData(format!(
                    "track {} has non-finite coordinates ({}, {})",
                    track.id, track.position.x, track.position.y
                )));
            }
            if index.insert(track.id.clone(), position).is_some() {
                return Err(Error::DuplicateTrackId(track.id.to_string()));
            }
        }

        Ok(Self { tracks, index })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    #[must_use]
    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.index.get(id).and_then(|&i| self.tracks.get(i))
    }

    /// Distinct genres in order of first appearance.
    #[must_use]
    pub fn genres(&self) -> Vec<&str> {
        let mut genres: Vec<&str> = Vec::new();
        for track in &self.tracks {
            if !genres.contains(&track.genre.as_str()) {
                genres.push(&track.genre);
            }
        }
        genres
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut genres: Vec<GenreCount> = Vec::new();
        for track in &self.tracks {
            match genres.iter_mut().find(|g| g.genre == track.genre) {
                Some(count) => count.tracks += 1,
                None => genres.push(GenreCount {
                    genre: track.genre.clone(),
                    tracks: 1,
                }),
            }
        }

        let popularity = self
            .tracks
            .iter()
            .map(|t| t.popularity)
            .fold(None, |acc: Option<(u8, u8)>, p| match acc {
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
                None => Some((p, p)),
            });

        Summary {
            track_count: self.tracks.len(),
            genres,
            popularity,
            bounds: Bounds::enclosing(self.tracks.iter().map(|t| t.position)),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
