use std::fmt::Write;

use crate::models::movie::NO_POSTER_PLACEHOLDER;
use crate::models::{Movie, SearchCounter};

const CARD_WIDTH: usize = 34;

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

fn card_lines(movie: &Movie) -> [String; 2] {
    [
        truncate(&movie.title, CARD_WIDTH),
        truncate(
            &format!(
                "★ {} · {} · {}",
                movie.rating_label(),
                movie.language_label(),
                movie.release_year()
            ),
            CARD_WIDTH,
        ),
    ]
}

/// Lays out at most `max` movies as cards, `per_row` cards to a row. Poster
/// URLs follow each row in full, one per line, in card order.
#[must_use]
pub fn render_movie_grid(
    movies: &[Movie],
    image_base_url: &str,
    per_row: usize,
    max: usize,
) -> String {
    if movies.is_empty() || max == 0 {
        return "No movies found.\n".to_string();
    }

    let per_row = per_row.max(1);
    let mut out = String::new();

    for row in movies[..movies.len().min(max)].chunks(per_row) {
        let cards: Vec<[String; 2]> = row.iter().map(card_lines).collect();
        for line in 0..2 {
            let cells: Vec<String> = cards
                .iter()
                .map(|c| format!("{:<width$}", c[line], width = CARD_WIDTH))
                .collect();
            let _ = writeln!(out, "{}", cells.join("  ").trim_end());
        }
        for movie in row {
            let poster = movie
                .poster_url(image_base_url)
                .unwrap_or_else(|| NO_POSTER_PLACEHOLDER.to_string());
            let _ = writeln!(out, "  {poster}");
        }
        out.push('\n');
    }

    out
}

#[must_use]
pub fn render_trending(counters: &[SearchCounter]) -> String {
    if counters.is_empty() {
        return "No trending searches yet.\n".to_string();
    }

    let mut out = String::new();
    for (rank, counter) in counters.iter().enumerate() {
        let searches = if counter.count == 1 { "search" } else { "searches" };
        let poster = if counter.poster_url.is_empty() {
            NO_POSTER_PLACEHOLDER
        } else {
            &counter.poster_url
        };
        let _ = writeln!(
            out,
            "{:>2}. {} ({} {searches})  {poster}",
            rank + 1,
            counter.search_term,
            counter.count
        );
    }
    out
}
