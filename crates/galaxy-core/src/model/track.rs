use serde::{Deserialize, Serialize};

use crate::model::ids::TrackId;
use crate::model::point::Point;

/// Highest popularity value a track can carry.
pub const MAX_POPULARITY: u8 = 100;

/// A single track placed in the embedding plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    pub artist: String,
    pub genre: String,

    /// Popularity score, 0-100.
    pub popularity: u8,

    /// Embedding coordinates.
    pub position: Point,
}

impl Track {
    #[must_use]
    pub fn new(
        id: impl Into<TrackId>,
        name: impl Into<String>,
        artist: impl Into<String>,
        genre: impl Into<String>,
        popularity: u8,
        position: impl Into<Point>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: artist.into(),
            genre: genre.into(),
            popularity,
            position: position.into(),
        }
    }

    /// "name by artist", the label used wherever a track is picked.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} by {}", self.name, self.artist)
    }
}
