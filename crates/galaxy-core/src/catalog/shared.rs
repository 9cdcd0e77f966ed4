//! The process-wide catalog.
//!
//! The catalog is loaded at most once per process and never mutated, so
//! every reader can hold a `&'static Catalog` without locking.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::catalog::{artifact, Catalog};
use crate::error::{Error, Result};

static SHARED: OnceLock<(PathBuf, Catalog)> = OnceLock::new();

/// Load the catalog at `path` on first use and return the cached copy on
/// every later call.
///
/// Asking for a different path once a catalog is cached fails with
/// [`Error::AlreadyLoaded`].
pub fn load(path: impl AsRef<Path>) -> Result<&'static Catalog> {
    let path = path.as_ref();

    if let Some((loaded_from, catalog)) = SHARED.get() {
        return check_path(loaded_from, path).map(|()| catalog);
    }

    let catalog = artifact::load(path)?;
    // Two racing loaders read the same immutable file; whichever lands
    // first wins and the other copy is dropped.
    let (loaded_from, catalog) = SHARED.get_or_init(|| (path.to_path_buf(), catalog));
    check_path(loaded_from, path)?;
    Ok(catalog)
}

/// The cached catalog, if one has been loaded.
pub fn get() -> Option<&'static Catalog> {
    SHARED.get().map(|(_, catalog)| catalog)
}

fn check_path(loaded_from: &Path, requested: &Path) -> Result<()> {
    if loaded_from == requested {
        Ok(())
    } else {
        Err(Error::AlreadyLoaded {
            path: loaded_from.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Track;
    use tempfile::TempDir;

    // The cell is process-wide, so everything touching it lives in one test.
    #[test]
    fn test_shared_catalog_loads_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.json");
        let other = temp_dir.path().join("other.json");

        let catalog = Catalog::from_tracks(vec![Track::new(
            "a", "Alpha", "One", "techno", 40, (0.0, 0.0),
        )])
        .unwrap();
        artifact::save(&catalog, &path).unwrap();
        artifact::save(&catalog, &other).unwrap();

        let first = load(&path).unwrap();
        assert_eq!(first.len(), 1);

        // Removing the file proves the second call does not touch disk.
        std::fs::remove_file(&path).unwrap();
        let second = load(&path).unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(get().unwrap(), first));

        let err = load(&other).unwrap_err();
        assert!(matches!(err, Error::AlreadyLoaded { path: p } if p == path));
    }
}
