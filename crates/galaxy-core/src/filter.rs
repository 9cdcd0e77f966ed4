//! Genre and popularity filtering.

use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::model::{Track, MAX_POPULARITY};

/// Minimum popularity applied when nothing else is configured.
pub const DEFAULT_MIN_POPULARITY: u8 = 20;

/// Which tracks are visible: a set of selected genres and a popularity
/// floor. A track passes when its genre is selected and its popularity is
/// at least `min_popularity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    genres: BTreeSet<String>,
    min_popularity: u8,
}

impl FilterCriteria {
    /// Select every genre present in `catalog`.
    #[must_use]
    pub fn all(catalog: &Catalog, min_popularity: u8) -> Self {
        Self {
            genres: catalog.genres().into_iter().map(str::to_string).collect(),
            min_popularity: min_popularity.min(MAX_POPULARITY),
        }
    }

    /// Select the named genres, resolved case-insensitively against the
    /// catalog. An empty list selects every genre.
    pub fn for_genres<S: AsRef<str>>(
        catalog: &Catalog,
        names: &[S],
        min_popularity: u8,
    ) -> Result<Self> {
        if names.is_empty() {
            return Ok(Self::all(catalog, min_popularity));
        }

        let available = catalog.genres();
        let mut genres = BTreeSet::new();
        for name in names {
            let name = name.as_ref().trim();
            let genre = available
                .iter()
                .find(|g| g.to_lowercase() == name.to_lowercase())
                .ok_or_else(|| Error::UnknownGenre(name.to_string()))?;
            genres.insert((*genre).to_string());
        }

        Ok(Self {
            genres,
            min_popularity: min_popularity.min(MAX_POPULARITY),
        })
    }

    #[must_use]
    pub fn min_popularity(&self) -> u8 {
        self.min_popularity
    }

    /// Set the popularity floor, clamped to 0-100.
    pub fn set_min_popularity(&mut self, value: u8) {
        if value > MAX_POPULARITY {
            log::warn!(
                "Minimum popularity {} clamped to {}",
                value,
                MAX_POPULARITY
            );
        }
        self.min_popularity = value.min(MAX_POPULARITY);
    }

    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genres.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_selected(&self, genre: &str) -> bool {
        self.genres.contains(genre)
    }

    /// Flip a genre in or out of the selection.
    pub fn toggle_genre(&mut self, genre: &str) {
        if !self.genres.remove(genre) {
            self.genres.insert(genre.to_string());
        }
    }

    pub fn select_genres<'a>(&mut self, genres: impl IntoIterator<Item = &'a str>) {
        self.genres.extend(genres.into_iter().map(str::to_string));
    }

    pub fn clear_genres(&mut self) {
        self.genres.clear();
    }

    #[must_use]
    pub fn matches(&self, track: &Track) -> bool {
        track.popularity >= self.min_popularity && self.genres.contains(&track.genre)
    }

    /// The filtered view: matching tracks in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Track> {
        let view: Vec<&Track> = catalog.iter().filter(|t| self.matches(t)).collect();
        log::debug!(
            "Filter kept {} of {} tracks ({} genres, popularity >= {})",
            view.len(),
            catalog.len(),
            self.genres.len(),
            self.min_popularity
        );
        view
    }
}
