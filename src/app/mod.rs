pub mod stats;

use std::io::{self, Write};

use rand::seq::IteratorRandom;

use crate::clients::omdb_client::OmdbClient;
use crate::error::Result;
use crate::model::movie::{MovieCollection, MovieRecord};
use crate::storage::Storage;
use crate::web::site_generator;

const WEBSITE_FILE_NAME: &str = "movies.html";

/// The interactive menu loop. Owns the in-memory collection and the storage
/// backend it was constructed with; every mutation is persisted immediately.
pub struct MovieApp {
    storage: Box<dyn Storage>,
    client: Option<OmdbClient>,
    movies: MovieCollection,
}

impl MovieApp {
    pub fn new(storage: Box<dyn Storage>, client: Option<OmdbClient>) -> Self {
        MovieApp {
            storage,
            client,
            movies: MovieCollection::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.movies = self.storage.list()?;
        log::info!("Loaded {} movies", self.movies.len());

        loop {
            println!(
                "\n0. Exit\n\
                 1. List movies\n\
                 2. Add movie\n\
                 3. Delete movie\n\
                 4. Update movie\n\
                 5. Statistics\n\
                 6. Random movie\n\
                 7. Search movie\n\
                 8. Movies sorted by rating\n\
                 9. Generate website\n\
                 10. Add movie from OMDb\n"
            );

            let choice = prompt("Choose from the menu: ")?;
            match choice.as_str() {
                "0" => {
                    println!("Exiting the app.");
                    break;
                }
                "1" => self.list_movies(),
                "2" => self.add_movie()?,
                "3" => self.delete_movie()?,
                "4" => self.update_movie()?,
                "5" => self.statistics(),
                "6" => self.random_movie(),
                "7" => self.search_movies()?,
                "8" => self.list_sorted_by_rating(),
                "9" => self.generate_website(),
                "10" => self.add_movie_from_omdb().await?,
                _ => println!("Invalid choice, try again."),
            }
        }
        Ok(())
    }

    fn list_movies(&self) {
        if self.movies.is_empty() {
            println!("No movies found.");
            return;
        }
        for (title, record) in self.movies.iter() {
            println!("{}", format_movie_line(title, record));
        }
    }

    fn add_movie(&mut self) -> Result<()> {
        let raw = prompt("Please enter the movie title: ")?;
        let title = match parse_title_input(&raw) {
            Some(title) => title.to_string(),
            None => {
                println!("Movie title cannot be empty!");
                return Ok(());
            }
        };

        let rating = match read_rating("Please rate the movie (1 - 10): ")? {
            Some(rating) => rating,
            None => return Ok(()),
        };
        let year = match read_year("Please enter the release year: ")? {
            Some(year) => year,
            None => return Ok(()),
        };

        let record = MovieRecord {
            rating: Some(rating),
            year,
            poster: None,
        };
        self.insert_and_save(title, record)
    }

    fn delete_movie(&mut self) -> Result<()> {
        let title = prompt("Please enter the movie you want to delete: ")?;
        if self.movies.remove(&title).is_some() {
            self.storage.save(&self.movies)?;
            println!("Movie '{}' has been deleted.", title);
        } else {
            println!("Movie '{}' is not in the list.", title);
        }
        Ok(())
    }

    fn update_movie(&mut self) -> Result<()> {
        let title = prompt("Please enter the movie you want to update: ")?;
        if !self.movies.contains_key(&title) {
            println!("Movie '{}' not found in the database.", title);
            return Ok(());
        }

        let rating = match read_rating("Please enter the new rating for that movie (1 - 10): ")? {
            Some(rating) => rating,
            None => return Ok(()),
        };
        let year = match read_year("Please enter the new year for that movie: ")? {
            Some(year) => year,
            None => return Ok(()),
        };

        if let Some(record) = self.movies.get_mut(&title) {
            record.rating = Some(rating);
            record.year = year;
        }
        self.storage.save(&self.movies)?;
        println!(
            "Movie '{}' has been updated to rating {} and year {}",
            title, rating, year
        );
        Ok(())
    }

    fn statistics(&self) {
        match stats::rating_stats(&self.movies) {
            Some(stats) => {
                println!("\nAverage rating: {:.2}", stats.average);
                println!("Median rating: {:.2}", stats.median);
                println!(
                    "Best movie: {} - Rating: {}",
                    stats.best_title,
                    format_rating(self.movies[&stats.best_title].rating)
                );
                println!(
                    "Worst movie: {} - Rating: {}",
                    stats.worst_title,
                    format_rating(self.movies[&stats.worst_title].rating)
                );
            }
            None => println!("No rated movies found."),
        }
    }

    fn random_movie(&self) {
        match self.movies.iter().choose(&mut rand::thread_rng()) {
            Some((title, record)) => println!(
                "Randomly selected movie: {} with a rating of {}",
                title,
                format_rating(record.rating)
            ),
            None => println!("No movies available."),
        }
    }

    fn search_movies(&self) -> Result<()> {
        let query = prompt("Please enter the movie you want to search: ")?;
        let hits = stats::search(&self.movies, &query);
        if hits.is_empty() {
            println!("No movie found with '{}' in its title.", query);
            return Ok(());
        }
        for (title, record) in hits {
            println!("{}", format_movie_line(title, record));
        }
        Ok(())
    }

    fn list_sorted_by_rating(&self) {
        for (title, record) in stats::sorted_by_rating(&self.movies) {
            println!("{}", format_movie_line(title, record));
        }
    }

    fn generate_website(&self) {
        match site_generator::generate_website(&self.movies, WEBSITE_FILE_NAME) {
            Ok(()) => println!("Website has been generated as '{}'.", WEBSITE_FILE_NAME),
            Err(e) => {
                log::error!("Error writing website file: {}", e);
                println!("Could not generate the website: {}", e);
            }
        }
    }

    async fn add_movie_from_omdb(&mut self) -> Result<()> {
        let client = match &self.client {
            Some(client) => client.clone(),
            None => {
                println!("OMDb lookups need an API key. Set OMDB_API_KEY and restart.");
                return Ok(());
            }
        };

        let raw = prompt("Enter the movie title: ")?;
        let title = match parse_title_input(&raw) {
            Some(title) => title.to_string(),
            None => {
                println!("Movie title cannot be empty!");
                return Ok(());
            }
        };

        match client.fetch_by_title(&title).await {
            Ok(Some((found_title, record))) => {
                println!("Movie '{}' added successfully!", found_title);
                self.insert_and_save(found_title, record)
            }
            Ok(None) => {
                println!("Movie '{}' not found in OMDb.", title);
                Ok(())
            }
            Err(e) => {
                // Network trouble is reported, not fatal.
                log::error!("OMDb lookup failed: {}", e);
                println!("Error: could not reach the OMDb API. {}", e);
                Ok(())
            }
        }
    }

    fn insert_and_save(&mut self, title: String, record: MovieRecord) -> Result<()> {
        let line = format_movie_line(&title, &record);
        if self.movies.insert(title.clone(), record).is_some() {
            log::warn!("'{}' already exists and was overwritten", title);
            println!("Warning: '{}' already existed. It has been overwritten.", title);
        }
        self.storage.save(&self.movies)?;
        println!("Added movie: {}", line);
        Ok(())
    }
}

fn format_movie_line(title: &str, record: &MovieRecord) -> String {
    format!(
        "{}: {} ({})",
        title,
        format_rating(record.rating),
        record.year
    )
}

fn format_rating(rating: Option<f64>) -> String {
    rating
        .map(|r| r.to_string())
        .unwrap_or_else(|| "unrated".to_string())
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut user_input = String::new();
    io::stdin().read_line(&mut user_input)?;
    Ok(user_input.trim().to_string())
}

fn read_rating(message: &str) -> io::Result<Option<f64>> {
    let raw = prompt(message)?;
    match parse_rating_input(&raw) {
        Ok(rating) => Ok(Some(rating)),
        Err(reason) => {
            println!("Invalid input for rating: {}", reason);
            Ok(None)
        }
    }
}

fn read_year(message: &str) -> io::Result<Option<u32>> {
    let raw = prompt(message)?;
    match parse_year_input(&raw) {
        Ok(year) => Ok(Some(year)),
        Err(reason) => {
            println!("Invalid input for year: {}", reason);
            Ok(None)
        }
    }
}

/// A usable title is whatever the user typed, minus surrounding whitespace;
/// nothing but whitespace is rejected.
fn parse_title_input(raw: &str) -> Option<&str> {
    let title = raw.trim();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

fn parse_rating_input(raw: &str) -> std::result::Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(rating) if (1.0..=10.0).contains(&rating) => Ok(rating),
        Ok(_) => Err("rating should be between 1 and 10".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_year_input(raw: &str) -> std::result::Result<u32, String> {
    raw.parse::<u32>().map_err(|e| e.to_string())
}
