use anyhow::Result;
use galaxy_core::{Config, Track};
use serde::Serialize;
use std::io::{self, Write};

use super::table::cell;
use crate::FilterArgs;

/// One track in the artifact's column naming.
#[derive(Debug, Serialize)]
pub struct TrackRow<'a> {
    pub track_id: &'a str,
    pub track_name: &'a str,
    pub track_artist: &'a str,
    pub track_genre: &'a str,
    pub track_popularity: u8,
    pub x: f64,
    pub y: f64,
}

impl<'a> From<&'a Track> for TrackRow<'a> {
    fn from(track: &'a Track) -> Self {
        Self {
            track_id: track.id.as_str(),
            track_name: &track.name,
            track_artist: &track.artist,
            track_genre: &track.genre,
            track_popularity: track.popularity,
            x: track.position.x,
            y: track.position.y,
        }
    }
}

/// Print the filtered tracks.
pub fn run_list(config: &Config, filters: &FilterArgs, json: bool) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    let criteria = super::criteria_from_args(catalog, config, filters)?;
    let filtered = criteria.apply(catalog);

    if json {
        let rows: Vec<TrackRow<'_>> = filtered.iter().map(|t| TrackRow::from(*t)).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        write_list(&mut io::stdout().lock(), &filtered, catalog.len())?;
    }
    Ok(())
}

/// Write the raw listing as an aligned text table.
pub fn write_list(out: &mut impl Write, filtered: &[&Track], catalog_len: usize) -> io::Result<()> {
    if filtered.is_empty() {
        return writeln!(out, "{}", galaxy_search::outcome::EMPTY_FILTER_MESSAGE);
    }

    writeln!(
        out,
        "{:>5}  {}  {}  {}  {}  {:>4}  {:>9}  {:>9}",
        "#",
        cell("Track ID", 22),
        cell("Name", 32),
        cell("Artist", 24),
        cell("Genre", 16),
        "Pop",
        "x",
        "y"
    )?;
    for (i, track) in filtered.iter().enumerate() {
        writeln!(
            out,
            "{:>5}  {}  {}  {}  {}  {:>4}  {:>9.4}  {:>9.4}",
            i + 1,
            cell(track.id.as_str(), 22),
            cell(&track.name, 32),
            cell(&track.artist, 24),
            cell(&track.genre, 16),
            track.popularity,
            track.position.x,
            track.position.y
        )?;
    }
    writeln!(out, "\n{} of {} tracks", filtered.len(), catalog_len)
}
