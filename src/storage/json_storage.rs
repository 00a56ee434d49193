use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::model::movie::MovieCollection;
use crate::storage::Storage;

/// Stores the collection as one pretty-printed JSON object keyed by title.
pub struct JsonStorage {
    file_path: PathBuf,
}

impl JsonStorage {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        JsonStorage {
            file_path: file_path.into(),
        }
    }
}

impl Storage for JsonStorage {
    fn list(&self) -> Result<MovieCollection> {
        let contents = match fs::read_to_string(&self.file_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(MovieCollection::new())
            }
            Err(e) => return Err(e.into()),
        };

        let movies = serde_json::from_str(&contents)?;
        Ok(movies)
    }

    fn save(&self, movies: &MovieCollection) -> Result<()> {
        let contents = serde_json::to_string_pretty(movies)?;
        fs::write(&self.file_path, contents)?;
        log::info!(
            "Saved {} movies to {}",
            movies.len(),
            self.file_path.display()
        );
        Ok(())
    }
}
