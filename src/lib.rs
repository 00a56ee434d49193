use std::env;
use std::path::PathBuf;

pub mod app;
pub mod clients;
pub mod error;
pub mod model;
pub mod storage;
pub mod web;

use app::MovieApp;
use clients::omdb_client::OmdbClient;
use error::Result;

/// Build the storage backend for `data_path`, wire up the OMDb client when a
/// key is configured, and hand both to the menu loop.
pub async fn run(data_path: PathBuf) -> Result<()> {
    let storage = storage::open(&data_path);

    let client = env::var("OMDB_API_KEY").ok().map(OmdbClient::new);
    if client.is_none() {
        log::warn!("OMDB_API_KEY is not set; OMDb lookups are disabled");
    }

    let mut movie_app = MovieApp::new(storage, client);
    movie_app.run().await
}
