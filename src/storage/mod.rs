pub mod csv_storage;
pub mod json_storage;

use std::path::Path;

use crate::error::Result;
use crate::model::movie::MovieCollection;

use csv_storage::CsvStorage;
use json_storage::JsonStorage;

/// A file-backed movie store. Each call is a whole-file read or rewrite;
/// there is no partial update and no locking.
pub trait Storage {
    /// Read and parse the backing file. A missing file is an empty
    /// collection, not an error. A malformed file is an error.
    fn list(&self) -> Result<MovieCollection>;

    /// Serialize the entire collection and overwrite the backing file.
    fn save(&self, movies: &MovieCollection) -> Result<()>;
}

/// Pick a backend by data-file extension: `.csv` gets the CSV backend,
/// everything else is stored as JSON.
pub fn open(path: &Path) -> Box<dyn Storage> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => Box::new(CsvStorage::new(path)),
        _ => Box::new(JsonStorage::new(path)),
    }
}
