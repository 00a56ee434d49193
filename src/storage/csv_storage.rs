use std::path::PathBuf;

use csv::{Reader, Writer};

use crate::error::{Result, ShelfError};
use crate::model::movie::{MovieCollection, MovieRecord};
use crate::storage::Storage;

/// Stores the collection as CSV with a `title,year,rating,poster` header.
/// Rating and poster are written as empty fields when absent.
pub struct CsvStorage {
    file_path: PathBuf,
}

impl CsvStorage {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        CsvStorage {
            file_path: file_path.into(),
        }
    }
}

impl Storage for CsvStorage {
    fn list(&self) -> Result<MovieCollection> {
        let mut reader = match Reader::from_path(&self.file_path) {
            Ok(reader) => reader,
            Err(e) => {
                if let csv::ErrorKind::Io(io_err) = e.kind() {
                    if io_err.kind() == std::io::ErrorKind::NotFound {
                        return Ok(MovieCollection::new());
                    }
                }
                return Err(e.into());
            }
        };

        let mut movies = MovieCollection::new();
        for row in reader.records() {
            let row = row?;
            if row.len() != 4 {
                return Err(ShelfError::MalformedRecord(format!(
                    "expected 4 fields, got {} in row {:?}",
                    row.len(),
                    row
                )));
            }
            let (title, record) =
                MovieRecord::from_csv_fields(&row[0], &row[1], &row[2], &row[3])?;
            movies.insert(title, record);
        }
        Ok(movies)
    }

    fn save(&self, movies: &MovieCollection) -> Result<()> {
        let mut wrt = Writer::from_path(&self.file_path)?;
        wrt.write_record(MovieRecord::csv_titles())?;
        for (title, record) in movies.iter() {
            wrt.write_record(record.to_csvable_array(title))?;
        }
        wrt.flush()?;
        log::info!(
            "Saved {} movies to {}",
            movies.len(),
            self.file_path.display()
        );
        Ok(())
    }
}
