//! Integration tests for loading and saving catalog artifacts.

use galaxy_core::catalog::artifact;
use galaxy_core::{Catalog, Error, Track, TrackId};
use rusqlite::Connection;
use tempfile::TempDir;

fn techno_catalog() -> Catalog {
    Catalog::from_tracks(vec![
        Track::new("7ouMYWpwJ422jRcDASZB7P", "Knights of Cydonia", "Muse", "rock", 71, (2.25, -0.5)),
        Track::new("1x5MjCffpibMhRxYpXHU0X", "The Bells", "Jeff Mills", "techno", 48, (-1.75, 3.0)),
        Track::new("3zBhihYUHBmGd2bcQIobrF", "Strings of Life", "Rhythim Is Rhythim", "techno", 44, (-1.5, 2.5)),
    ])
    .unwrap()
}

#[test]
fn test_columnar_artifact_preserves_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.bin");
    let catalog = techno_catalog();

    artifact::save(&catalog, &path).unwrap();
    let loaded = artifact::load(&path).unwrap();

    assert_eq!(loaded.tracks(), catalog.tracks());
}

#[test]
fn test_sqlite_artifact_preserves_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.db");
    let catalog = techno_catalog();

    artifact::save(&catalog, &path).unwrap();
    // Saving twice replaces the file instead of failing on the existing table.
    artifact::save(&catalog, &path).unwrap();
    let loaded = artifact::load(&path).unwrap();

    assert_eq!(loaded.tracks(), catalog.tracks());
}

#[test]
fn test_convert_json_to_columnar() {
    let temp_dir = TempDir::new().unwrap();
    let json = temp_dir.path().join("catalog.json");
    let bin = temp_dir.path().join("catalog.galaxy");

    artifact::save(&techno_catalog(), &json).unwrap();
    let from_json = artifact::load(&json).unwrap();
    artifact::save(&from_json, &bin).unwrap();
    let from_bin = artifact::load(&bin).unwrap();

    assert_eq!(from_bin.len(), 3);
    assert_eq!(
        from_bin.get(&TrackId::new("1x5MjCffpibMhRxYpXHU0X")).unwrap().artist,
        "Jeff Mills"
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = artifact::load(temp_dir.path().join("nope.bin")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_columnar_rejects_foreign_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.bin");
    std::fs::write(&path, b"\x80\x04\x95pickle").unwrap();

    let err = artifact::load(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}

#[test]
fn test_json_missing_column_is_schema_mismatch() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"[{"track_id": "a", "track_name": "Alpha", "track_artist": "One",
             "track_genre": "techno", "track_popularity": 40, "x": 0.5}]"#,
    )
    .unwrap();

    let err = artifact::load(&path).unwrap_err();
    match err {
        Error::SchemaMismatch { expected, found } => {
            assert_eq!(expected.len(), 7);
            assert_eq!(found.len(), 6);
        }
        other => panic!("expected schema mismatch, got {other}"),
    }
}

#[test]
fn test_json_duplicate_ids_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"[
            {"track_id": "a", "track_name": "Alpha", "track_artist": "One",
             "track_genre": "techno", "track_popularity": 40, "x": 0.5, "y": 1.0},
            {"track_id": "a", "track_name": "Alpha", "track_artist": "One",
             "track_genre": "house", "track_popularity": 40, "x": 0.5, "y": 1.0}
        ]"#,
    )
    .unwrap();

    assert!(matches!(
        artifact::load(&path),
        Err(Error::DuplicateTrackId(_))
    ));
}

#[test]
fn test_sqlite_extra_column_is_schema_mismatch() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.sqlite");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE tracks (
            track_id TEXT, track_name TEXT, track_artist TEXT, track_genre TEXT,
            track_popularity INTEGER, x REAL, y REAL, energy REAL
        );",
    )
    .unwrap();
    drop(conn);

    let err = artifact::load(&path).unwrap_err();
    assert!(matches!(err, Error::SchemaMismatch { found, .. } if found.contains(&"energy".to_string())));
}

#[test]
fn test_sqlite_popularity_out_of_range() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.sqlite");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE tracks (
            track_id TEXT, track_name TEXT, track_artist TEXT, track_genre TEXT,
            track_popularity INTEGER, x REAL, y REAL
        );
        INSERT INTO tracks VALUES ('a', 'Alpha', 'One', 'techno', 300, 1, 2);",
    )
    .unwrap();
    drop(conn);

    assert!(matches!(artifact::load(&path), Err(Error::InvalidData(_))));
}
