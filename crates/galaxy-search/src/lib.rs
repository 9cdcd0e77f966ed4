//! Nearest-neighbor recommendations for galaxy.
//!
//! Scores tracks by Euclidean distance to a reference track in the 2-D
//! embedding plane, normalizes the distances into a query-relative
//! relevance, and wraps the search-then-recommend flow in an explicit
//! [`Outcome`].

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod count;
pub mod distance;
pub mod outcome;
pub mod query;
pub mod scorer;

pub use count::CountOptions;
pub use outcome::{recommend_for_query, Outcome, Recommendations, Request};
pub use scorer::{recommend, score, ScoredCandidate};
