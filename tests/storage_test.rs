use std::fs;

use tempfile::TempDir;

use movieshelf::model::movie::{MovieCollection, MovieRecord};
use movieshelf::storage::csv_storage::CsvStorage;
use movieshelf::storage::json_storage::JsonStorage;
use movieshelf::storage::Storage;

fn sample_collection() -> MovieCollection {
    let mut movies = MovieCollection::new();
    movies.insert(
        "The Shawshank Redemption".to_string(),
        MovieRecord {
            rating: Some(9.3),
            year: 1994,
            poster: Some("https://example.com/shawshank.jpg".to_string()),
        },
    );
    movies.insert(
        "Pulp Fiction".to_string(),
        MovieRecord {
            rating: Some(8.5),
            year: 1994,
            poster: None,
        },
    );
    movies.insert(
        "Unseen Festival Cut".to_string(),
        MovieRecord {
            rating: None,
            year: 2021,
            poster: None,
        },
    );
    movies
}

#[test]
fn json_round_trip_preserves_the_collection() {
    let dir = TempDir::new().unwrap();
    let storage = JsonStorage::new(dir.path().join("movies.json"));

    let movies = sample_collection();
    storage.save(&movies).unwrap();
    let reloaded = storage.list().unwrap();

    assert_eq!(reloaded, movies);
    assert_eq!(reloaded["Pulp Fiction"].rating, Some(8.5));
    assert_eq!(reloaded["The Shawshank Redemption"].year, 1994);
}

#[test]
fn csv_round_trip_preserves_the_collection() {
    let dir = TempDir::new().unwrap();
    let storage = CsvStorage::new(dir.path().join("movies.csv"));

    let movies = sample_collection();
    storage.save(&movies).unwrap();
    let reloaded = storage.list().unwrap();

    assert_eq!(reloaded, movies);
    assert_eq!(reloaded["Unseen Festival Cut"].rating, None);
}

#[test]
fn missing_json_file_is_an_empty_collection() {
    let dir = TempDir::new().unwrap();
    let storage = JsonStorage::new(dir.path().join("does_not_exist.json"));
    assert_eq!(storage.list().unwrap(), MovieCollection::new());
}

#[test]
fn missing_csv_file_is_an_empty_collection() {
    let dir = TempDir::new().unwrap();
    let storage = CsvStorage::new(dir.path().join("does_not_exist.csv"));
    assert_eq!(storage.list().unwrap(), MovieCollection::new());
}

#[test]
fn saving_twice_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("movies.json");
    let csv_path = dir.path().join("movies.csv");
    let movies = sample_collection();

    let json_storage = JsonStorage::new(&json_path);
    json_storage.save(&movies).unwrap();
    let first = fs::read(&json_path).unwrap();
    json_storage.save(&movies).unwrap();
    assert_eq!(fs::read(&json_path).unwrap(), first);

    let csv_storage = CsvStorage::new(&csv_path);
    csv_storage.save(&movies).unwrap();
    let first = fs::read(&csv_path).unwrap();
    csv_storage.save(&movies).unwrap();
    assert_eq!(fs::read(&csv_path).unwrap(), first);
}

#[test]
fn json_layout_is_an_object_keyed_by_title() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("movies.json");
    JsonStorage::new(&path).save(&sample_collection()).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let entry = &raw["Pulp Fiction"];
    assert_eq!(entry["rating"], serde_json::json!(8.5));
    assert_eq!(entry["year"], serde_json::json!(1994));
    // Absent poster is omitted rather than written as null.
    assert!(entry.get("poster").is_none());

    let unrated = &raw["Unseen Festival Cut"];
    assert_eq!(unrated["rating"], serde_json::Value::Null);
}

#[test]
fn csv_layout_has_the_expected_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("movies.csv");
    CsvStorage::new(&path).save(&sample_collection()).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("title,year,rating,poster\n"));
}

#[test]
fn malformed_json_is_a_fatal_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("movies.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(JsonStorage::new(&path).list().is_err());
}

#[test]
fn malformed_csv_row_is_a_fatal_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("movies.csv");
    fs::write(
        &path,
        "title,year,rating,poster\nBrazil,not-a-year,8.0,\n",
    )
    .unwrap();

    assert!(CsvStorage::new(&path).list().is_err());
}

#[test]
fn json_record_without_poster_field_parses() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("movies.json");
    fs::write(
        &path,
        r#"{"Metropolis": {"rating": 8.3, "year": 1927}}"#,
    )
    .unwrap();

    let movies = JsonStorage::new(&path).list().unwrap();
    assert_eq!(
        movies["Metropolis"],
        MovieRecord {
            rating: Some(8.3),
            year: 1927,
            poster: None,
        }
    );
}

#[test]
fn backend_is_picked_by_extension() {
    let dir = TempDir::new().unwrap();
    let movies = sample_collection();

    let csv_backend = movieshelf::storage::open(&dir.path().join("movies.csv"));
    csv_backend.save(&movies).unwrap();
    let csv_contents = fs::read_to_string(dir.path().join("movies.csv")).unwrap();
    assert!(csv_contents.starts_with("title,year,rating,poster"));

    let json_backend = movieshelf::storage::open(&dir.path().join("movies.json"));
    json_backend.save(&movies).unwrap();
    let json_contents = fs::read_to_string(dir.path().join("movies.json")).unwrap();
    assert!(json_contents.trim_start().starts_with('{'));
}
