//! Core domain model for galaxy.
//!
//! This crate defines the track model, the catalog and its on-disk
//! artifact encodings, the process-wide shared catalog, genre/popularity
//! filters, and the layered configuration.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;

pub use catalog::Catalog;
pub use config::Config;
pub use error::{Error, Result};
pub use filter::FilterCriteria;
pub use model::{Point, Track, TrackId};
