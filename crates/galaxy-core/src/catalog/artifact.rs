//! On-disk encodings of the catalog table.
//!
//! Every encoding carries the same seven columns (see [`COLUMNS`]). The
//! column set must match exactly; anything else is a fatal load error.
//!
//! | Extension                        | Encoding                         |
//! |----------------------------------|----------------------------------|
//! | `.bin`, `.galaxy`                | bincode columnar table           |
//! | `.db`, `.sqlite`, `.sqlite3`     | SQLite `tracks` table            |
//! | `.json`                          | array of row objects             |

use std::fmt;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::model::{Point, Track, TrackId};

/// Column names of the catalog table, in canonical order.
pub const COLUMNS: [&str; 7] = [
    "track_id",
    "track_name",
    "track_artist",
    "track_genre",
    "track_popularity",
    "x",
    "y",
];

/// Leading bytes of a columnar artifact.
const MAGIC: [u8; 4] = *b"GLXY";

/// Version of the columnar layout written by this crate.
const FORMAT_VERSION: u16 = 1;

/// Supported artifact encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Columnar,
    Sqlite,
    Json,
}

impl ArtifactFormat {
    /// Pick the encoding from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "bin" | "galaxy" => Ok(Self::Columnar),
            "db" | "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "json" => Ok(Self::Json),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Columnar => f.write_str("columnar"),
            Self::Sqlite => f.write_str("sqlite"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Load a catalog from `path`, choosing the decoder by extension.
pub fn load(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let format = ArtifactFormat::from_path(path)?;
    // Surface a missing file as an I/O error rather than a decoder error.
    fs::metadata(path)?;

    let tracks = match format {
        ArtifactFormat::Columnar => read_columnar(path)?,
        ArtifactFormat::Sqlite => read_sqlite(path)?,
        ArtifactFormat::Json => read_json(path)?,
    };

    let catalog = Catalog::from_tracks(tracks)?;
    log::info!(
        "Loaded {} tracks from {} ({})",
        catalog.len(),
        path.display(),
        format
    );
    Ok(catalog)
}

/// Write a catalog to `path`, choosing the encoder by extension.
///
/// Existing files are replaced.
pub fn save(catalog: &Catalog, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = ArtifactFormat::from_path(path)?;

    match format {
        ArtifactFormat::Columnar => write_columnar(catalog, path)?,
        ArtifactFormat::Sqlite => write_sqlite(catalog, path)?,
        ArtifactFormat::Json => write_json(catalog, path)?,
    }

    log::info!(
        "Wrote {} tracks to {} ({})",
        catalog.len(),
        path.display(),
        format
    );
    Ok(())
}

fn expected_columns() -> Vec<String> {
    COLUMNS.iter().map(|c| (*c).to_string()).collect()
}

/// Compare column names as sets; order carries no meaning in SQL or JSON.
fn check_column_set(found: Vec<String>) -> Result<()> {
    let mut sorted_found = found.clone();
    sorted_found.sort();
    let mut sorted_expected = expected_columns();
    sorted_expected.sort();

    if sorted_found == sorted_expected {
        Ok(())
    } else {
        Err(Error::SchemaMismatch {
            expected: expected_columns(),
            found,
        })
    }
}

// Columnar (bincode)

#[derive(Debug, Serialize, Deserialize)]
struct ColumnarTable {
    version: u16,
    columns: Vec<String>,
    track_id: Vec<String>,
    track_name: Vec<String>,
    track_artist: Vec<String>,
    track_genre: Vec<String>,
    track_popularity: Vec<u8>,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl ColumnarTable {
    fn from_catalog(catalog: &Catalog) -> Self {
        let tracks = catalog.tracks();
        Self {
            version: FORMAT_VERSION,
            columns: expected_columns(),
            track_id: tracks.iter().map(|t| t.id.to_string()).collect(),
            track_name: tracks.iter().map(|t| t.name.clone()).collect(),
            track_artist: tracks.iter().map(|t| t.artist.clone()).collect(),
            track_genre: tracks.iter().map(|t| t.genre.clone()).collect(),
            track_popularity: tracks.iter().map(|t| t.popularity).collect(),
            x: tracks.iter().map(|t| t.position.x).collect(),
            y: tracks.iter().map(|t| t.position.y).collect(),
        }
    }

    fn into_tracks(self) -> Result<Vec<Track>> {
        if self.version != FORMAT_VERSION {
            return Err(Error::InvalidData(format!(
                "unsupported columnar format version {} (expected {})",
                self.version, FORMAT_VERSION
            )));
        }
        // Header order is part of the columnar layout, so compare exactly.
        if self.columns != expected_columns() {
            return Err(Error::SchemaMismatch {
                expected: expected_columns(),
                found: self.columns,
            });
        }

        let rows = self.track_id.len();
        let lengths = [
            ("track_name", self.track_name.len()),
            ("track_artist", self.track_artist.len()),
            ("track_genre", self.track_genre.len()),
            ("track_popularity", self.track_popularity.len()),
            ("x", self.x.len()),
            ("y", self.y.len()),
        ];
        for (column, found) in lengths {
            if found != rows {
                return Err(Error::ColumnLength {
                    column,
                    expected: rows,
                    found,
                });
            }
        }

        let tracks = self
            .track_id
            .into_iter()
            .zip(self.track_name)
            .zip(self.track_artist)
            .zip(self.track_genre)
            .zip(self.track_popularity)
            .zip(self.x.into_iter().zip(self.y))
            .map(|(((((id, name), artist), genre), popularity), (x, y))| Track {
                id: TrackId::new(id),
                name,
                artist,
                genre,
                popularity,
                position: Point::new(x, y),
            })
            .collect();
        Ok(tracks)
    }
}

fn read_columnar(path: &Path) -> Result<Vec<Track>> {
    let bytes = fs::read(path)?;
    let body = bytes
        .strip_prefix(MAGIC.as_slice())
        .ok_or_else(|| Error::InvalidData(format!("{} is not a galaxy catalog", path.display())))?;
    let table: ColumnarTable = bincode::deserialize(body)?;
    table.into_tracks()
}

fn write_columnar(catalog: &Catalog, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(fs::File::create(path)?);
    writer.write_all(&MAGIC)?;
    bincode::serialize_into(&mut writer, &ColumnarTable::from_catalog(catalog))?;
    writer.flush()?;
    Ok(())
}

// SQLite

const CREATE_TRACKS: &str = "CREATE TABLE tracks (
    track_id TEXT PRIMARY KEY NOT NULL,
    track_name TEXT NOT NULL,
    track_artist TEXT NOT NULL,
    track_genre TEXT NOT NULL,
    track_popularity INTEGER NOT NULL,
    x REAL NOT NULL,
    y REAL NOT NULL
)";

fn read_sqlite(path: &Path) -> Result<Vec<Track>> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('tracks')")?;
    let found: Vec<String> = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    check_column_set(found)?;

    let mut stmt = conn.prepare(
        "SELECT track_id, track_name, track_artist, track_genre,
                track_popularity, x, y
         FROM tracks ORDER BY rowid",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, i64>(4)?,
            row.get::<_, f64>(5)?,
            row.get::<_, f64>(6)?,
        ))
    })?;

    let mut tracks = Vec::new();
    for row in rows {
        let (id, name, artist, genre, popularity, x, y) = row?;
        let popularity = u8::try_from(popularity).map_err(|_| {
            Error::InvalidData(format!(
                "track {} has popularity {}, expected 0-100",
                id, popularity
            ))
        })?;
        tracks.push(Track {
            id: TrackId::new(id),
            name,
            artist,
            genre,
            popularity,
            position: Point::new(x, y),
        });
    }
    Ok(tracks)
}

fn write_sqlite(catalog: &Catalog, path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }

    let mut conn = Connection::open(path)?;
    let tx = conn.transaction()?;
    tx.execute(CREATE_TRACKS, [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO tracks (
                track_id, track_name, track_artist, track_genre,
                track_popularity, x, y
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for track in catalog {
            stmt.execute(rusqlite::params![
                track.id.as_str(),
                track.name,
                track.artist,
                track.genre,
                i64::from(track.popularity),
                track.position.x,
                track.position.y,
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

// JSON

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct TrackRecord {
    track_id: String,
    track_name: String,
    track_artist: String,
    track_genre: String,
    track_popularity: u8,
    x: f64,
    y: f64,
}

impl From<TrackRecord> for Track {
    fn from(record: TrackRecord) -> Self {
        Self {
            id: TrackId::new(record.track_id),
            name: record.track_name,
            artist: record.track_artist,
            genre: record.track_genre,
            popularity: record.track_popularity,
            position: Point::new(record.x, record.y),
        }
    }
}

impl From<&Track> for TrackRecord {
    fn from(track: &Track) -> Self {
        Self {
            track_id: track.id.to_string(),
            track_name: track.name.clone(),
            track_artist: track.artist.clone(),
            track_genre: track.genre.clone(),
            track_popularity: track.popularity,
            x: track.position.x,
            y: track.position.y,
        }
    }
}

fn read_json(path: &Path) -> Result<Vec<Track>> {
    let contents = fs::read_to_string(path)?;
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(&contents)?;

    let mut tracks = Vec::with_capacity(rows.len());
    for row in rows {
        check_column_set(row.keys().cloned().collect())?;
        let record: TrackRecord = serde_json::from_value(serde_json::Value::Object(row))?;
        tracks.push(Track::from(record));
    }
    Ok(tracks)
}

fn write_json(catalog: &Catalog, path: &Path) -> Result<()> {
    let records: Vec<TrackRecord> = catalog.iter().map(TrackRecord::from).collect();
    let mut writer = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writer.flush()?;
    Ok(())
}
