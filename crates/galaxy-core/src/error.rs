use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("unsupported catalog format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("schema mismatch: expected columns [{}], found [{}]", expected.join(", "), found.join(", "))]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("column {column} has {found} rows, expected {expected}")]
    ColumnLength {
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("duplicate track id: {0}")]
    DuplicateTrackId(String),

    #[error("unknown genre: {0}")]
    UnknownGenre(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("catalog already loaded from {}", path.display())]
    AlreadyLoaded { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
