use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use super::error::LoadError;
use super::loader::load_file;
use super::model::Catalog;

// ---------------------------------------------------------------------------
// Process-wide catalog handle
// ---------------------------------------------------------------------------

/// Catalogs loaded so far, keyed by the path they were requested with.
/// Entries are never invalidated.
static CATALOG_CACHE: OnceLock<Mutex<HashMap<PathBuf, Arc<Catalog>>>> = OnceLock::new();

/// Return the shared catalog for `path`, loading it on first use.
///
/// Later calls with the same path hand back the same [`Arc`] without
/// touching the filesystem.  A failed load is not remembered, so the next
/// call tries again.
pub fn catalog(path: &Path) -> Result<Arc<Catalog>, LoadError> {
    let cache = CATALOG_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    // The map only ever gains complete entries, so a poisoned lock is still usable.
    let mut entries = cache.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(catalog) = entries.get(path) {
        log::debug!("Catalog cache hit for {}", path.display());
        return Ok(Arc::clone(catalog));
    }

    let catalog = Arc::new(load_file(path)?);
    entries.insert(path.to_path_buf(), Arc::clone(&catalog));
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_call_reuses_the_first_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tests.csv");
        std::fs::write(&path, "LOINC_NUM,CLASS\n1,CHEM\n2,UA\n").unwrap();

        let first = catalog(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let second = catalog(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("later.csv");

        assert!(matches!(catalog(&path), Err(LoadError::Io { .. })));

        std::fs::write(&path, "LOINC_NUM,CLASS\n1,CHEM\n").unwrap();
        let loaded = catalog(&path).unwrap();
        assert_eq!(loaded.len(), 1);
    }
}
