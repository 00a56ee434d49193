use reqwest::{header, Client};
use serde::Deserialize;
use tokio_retry::{
    strategy::{jitter, ExponentialBackoff},
    Retry,
};

use crate::error::{Result, ShelfError};
use crate::model::movie::MovieRecord;

const OMDB_BASE_URL: &str = "http://www.omdbapi.com/";

/// Client for the OMDb movie metadata API.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    api_key: String,
}

/// Raw OMDb response. `Response` is `"True"` or `"False"`; the data fields
/// only appear on a hit, and `"N/A"` stands in for missing values.
#[derive(Debug, Deserialize)]
struct OmdbPayload {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl OmdbClient {
    pub fn new(api_key: String) -> Self {
        let user_agent = header::HeaderValue::from_static("movieshelf");
        Self {
            client: Client::builder().user_agent(user_agent).build().unwrap(),
            api_key,
        }
    }

    /// Look a movie up by title. `Ok(None)` means OMDb has no match, which
    /// is not a failure.
    pub async fn fetch_by_title(&self, title: &str) -> Result<Option<(String, MovieRecord)>> {
        let body = self.get_payload(title).await?;
        let payload: OmdbPayload = serde_json::from_str(&body)
            .map_err(|e| ShelfError::Api(format!("unexpected OMDb response: {}", e)))?;

        if payload.response == "False" {
            log::info!(
                "OMDb has no match for {:?}: {}",
                title,
                payload.error.as_deref().unwrap_or("no reason given")
            );
            return Ok(None);
        }

        let found_title = payload
            .title
            .ok_or_else(|| ShelfError::Api("OMDb hit without a Title field".to_string()))?;
        let year = payload
            .year
            .as_deref()
            .and_then(parse_leading_year)
            .ok_or_else(|| {
                ShelfError::Api(format!("OMDb returned no usable year for {}", found_title))
            })?;

        let record = MovieRecord {
            rating: payload.imdb_rating.as_deref().and_then(parse_rating),
            year,
            poster: payload.poster.filter(|p| p != "N/A"),
        };
        Ok(Some((found_title, record)))
    }

    async fn get_payload(&self, title: &str) -> Result<String> {
        let retry_strategy = ExponentialBackoff::from_millis(10).map(jitter).take(5);
        Retry::spawn(retry_strategy, || async move {
            self.get_payload_no_retry(title).await
        })
        .await
    }

    async fn get_payload_no_retry(&self, title: &str) -> Result<String> {
        let request = self
            .client
            .get(OMDB_BASE_URL)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)]);

        match request.send().await {
            Ok(resp) => {
                if !resp.status().is_success() {
                    return Err(ShelfError::Api(format!(
                        "OMDb returned status {} for title {:?}",
                        resp.status(),
                        title
                    )));
                }
                match resp.text().await {
                    Ok(text) => Ok(text),
                    Err(e) => Err(ShelfError::Api(format!(
                        "failed to read OMDb response body for {:?}: {}",
                        title, e
                    ))),
                }
            }
            Err(e) => Err(ShelfError::Api(format!(
                "request to OMDb failed for {:?}: {}",
                title, e
            ))),
        }
    }
}

/// OMDb years come as `"1994"` for films but `"1994–1998"` for series;
/// take the leading run of digits.
fn parse_leading_year(year: &str) -> Option<u32> {
    let digits: String = year.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<u32>().ok()
}

fn parse_rating(rating: &str) -> Option<f64> {
    if rating == "N/A" {
        return None;
    }
    rating.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_hit() {
        let body = r#"{
            "Title": "Blade Runner",
            "Year": "1982",
            "imdbRating": "8.1",
            "Poster": "https://example.com/blade_runner.jpg",
            "Response": "True"
        }"#;

        let payload: OmdbPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.response, "True");
        assert_eq!(payload.title.as_deref(), Some("Blade Runner"));
        assert_eq!(payload.year.as_deref().and_then(parse_leading_year), Some(1982));
        assert_eq!(payload.imdb_rating.as_deref().and_then(parse_rating), Some(8.1));
    }

    #[test]
    fn parses_a_miss() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let payload: OmdbPayload = serde_json::from_str(body).unwrap();
        assert_eq!(payload.response, "False");
        assert_eq!(payload.error.as_deref(), Some("Movie not found!"));
    }

    #[test]
    fn not_available_rating_is_absent() {
        assert_eq!(parse_rating("N/A"), None);
        assert_eq!(parse_rating("7.3"), Some(7.3));
    }

    #[test]
    fn series_year_uses_leading_digits() {
        assert_eq!(parse_leading_year("1994–1998"), Some(1994));
        assert_eq!(parse_leading_year("2001"), Some(2001));
        assert_eq!(parse_leading_year("N/A"), None);
    }
}
