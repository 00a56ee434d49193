use std::env;
use std::path::PathBuf;

mod logging;

fn get_data_path() -> PathBuf {
    match env::args().nth(1) {
        None => PathBuf::from("movies.json"),
        Some(path) => PathBuf::from(path),
    }
}

#[tokio::main]
async fn main() {
    logging::setup_logging();

    if let Err(e) = movieshelf::run(get_data_path()).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
