use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::movie::MovieCollection;

const PAGE_HEADER: &str = "\
<html>
<head>
    <title>Movie Collection</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 20px;
            background-color: #f4f4f4;
        }
        h1 {
            text-align: center;
            color: #333;
        }
        ul {
            list-style-type: none;
            padding: 0;
        }
        li {
            padding: 10px;
            background-color: #fff;
            margin: 5px 0;
            border: 1px solid #ddd;
            border-radius: 5px;
        }
        li img {
            max-height: 120px;
            float: right;
        }
    </style>
</head>
<body>
    <h1>Movie Collection</h1>
    <ul>
";

const PAGE_FOOTER: &str = "\
    </ul>
</body>
</html>
";

/// Render the collection as a static HTML page and overwrite `path`.
pub fn generate_website(movies: &MovieCollection, path: impl AsRef<Path>) -> Result<()> {
    let html = render_page(movies);
    fs::write(path.as_ref(), html)?;
    log::info!(
        "Wrote website with {} movies to {}",
        movies.len(),
        path.as_ref().display()
    );
    Ok(())
}

fn render_page(movies: &MovieCollection) -> String {
    let mut html = String::from(PAGE_HEADER);
    for (title, record) in movies.iter() {
        let rating = record
            .rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unrated".to_string());
        html.push_str(&format!(
            "        <li><strong>{}</strong> - Rating: {} (Year: {})",
            escape_html(title),
            rating,
            record.year
        ));
        if let Some(poster) = &record.poster {
            html.push_str(&format!(
                " <img src=\"{}\" alt=\"Poster for {}\">",
                escape_html(poster),
                escape_html(title)
            ));
        }
        html.push_str("</li>\n");
    }
    html.push_str(PAGE_FOOTER);
    html
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
