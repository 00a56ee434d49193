use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShelfError};

/// The full in-memory collection for one run, keyed by title.
///
/// A BTreeMap keeps iteration order stable, so saving the same collection
/// twice produces byte-identical files.
pub type MovieCollection = BTreeMap<String, MovieRecord>;

/// One movie's details. The title lives in the collection key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub rating: Option<f64>,
    pub year: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

impl MovieRecord {
    pub fn csv_titles() -> Vec<&'static str> {
        vec!["title", "year", "rating", "poster"]
    }

    pub fn to_csvable_array(&self, title: &str) -> Vec<String> {
        vec![
            title.to_string(),
            self.year.to_string(),
            self.rating.map(|r| r.to_string()).unwrap_or_default(),
            self.poster.clone().unwrap_or_default(),
        ]
    }

    /// Rebuild a record from the string fields of one CSV row.
    /// Empty rating/poster fields mean the value is absent.
    pub fn from_csv_fields(
        title: &str,
        year: &str,
        rating: &str,
        poster: &str,
    ) -> Result<(String, MovieRecord)> {
        if title.is_empty() {
            return Err(ShelfError::MalformedRecord(
                "row with empty title".to_string(),
            ));
        }

        let year = year.parse::<u32>().map_err(|e| {
            ShelfError::MalformedRecord(format!("bad year {:?} for {}: {}", year, title, e))
        })?;

        let rating = if rating.is_empty() {
            None
        } else {
            Some(rating.parse::<f64>().map_err(|e| {
                ShelfError::MalformedRecord(format!("bad rating {:?} for {}: {}", rating, title, e))
            })?)
        };

        let poster = if poster.is_empty() {
            None
        } else {
            Some(poster.to_string())
        };

        Ok((
            title.to_string(),
            MovieRecord {
                rating,
                year,
                poster,
            },
        ))
    }
}
