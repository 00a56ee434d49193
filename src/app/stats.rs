use crate::model::movie::{MovieCollection, MovieRecord};

/// Summary of the ratings in a collection, computed over rated movies only.
#[derive(Debug, PartialEq)]
pub struct RatingStats {
    pub average: f64,
    pub median: f64,
    pub best_title: String,
    pub worst_title: String,
}

/// Returns `None` when no movie in the collection carries a rating.
pub fn rating_stats(movies: &MovieCollection) -> Option<RatingStats> {
    let mut rated: Vec<(&String, f64)> = movies
        .iter()
        .filter_map(|(title, record)| record.rating.map(|r| (title, r)))
        .collect();

    if rated.is_empty() {
        return None;
    }

    let sum: f64 = rated.iter().map(|(_, r)| r).sum();
    let average = sum / rated.len() as f64;

    rated.sort_by(|a, b| a.1.total_cmp(&b.1));
    let mid = rated.len() / 2;
    let median = if rated.len() % 2 == 1 {
        rated[mid].1
    } else {
        (rated[mid - 1].1 + rated[mid].1) / 2.0
    };

    let worst_title = rated[0].0.clone();
    let best_title = rated[rated.len() - 1].0.clone();

    Some(RatingStats {
        average,
        median,
        best_title,
        worst_title,
    })
}

/// Case-insensitive substring match on titles.
pub fn search<'a>(
    movies: &'a MovieCollection,
    query: &str,
) -> Vec<(&'a String, &'a MovieRecord)> {
    let query = query.to_lowercase();
    movies
        .iter()
        .filter(|(title, _)| title.to_lowercase().contains(&query))
        .collect()
}

/// All movies, highest-rated first. Unrated movies sort last.
pub fn sorted_by_rating(movies: &MovieCollection) -> Vec<(&String, &MovieRecord)> {
    let mut entries: Vec<_> = movies.iter().collect();
    entries.sort_by(|a, b| {
        let a_rating = a.1.rating.unwrap_or(f64::NEG_INFINITY);
        let b_rating = b.1.rating.unwrap_or(f64::NEG_INFINITY);
        b_rating.total_cmp(&a_rating)
    });
    entries
}
