pub mod ids;
pub mod point;
pub mod track;

pub use ids::TrackId;
pub use point::{Bounds, Point};
pub use track::{Track, MAX_POPULARITY};
