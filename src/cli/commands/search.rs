use crate::services::SearchOutcome;
use crate::state::SharedState;

use super::render::render_movie_grid;

pub async fn cmd_search(state: &SharedState, query: &str) -> anyhow::Result<()> {
    println!("Searching for: {query}");
    println!();

    let outcome = state.movies.load(query).await;
    print_outcome(state, &outcome);

    Ok(())
}

pub(super) fn print_outcome(state: &SharedState, outcome: &SearchOutcome) {
    if let Some(message) = &outcome.error_message {
        println!("{message}");
        return;
    }

    print!(
        "{}",
        render_movie_grid(
            &outcome.movies,
            &state.config.tmdb.image_base_url,
            state.config.search.cards_per_row,
            state.config.search.max_results_displayed,
        )
    );
}
