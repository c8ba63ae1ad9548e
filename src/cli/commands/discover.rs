use crate::state::SharedState;

use super::render::render_trending;
use super::search::print_outcome;

/// Popular movies plus the trending searches, as shown before anything is typed.
pub async fn cmd_discover(state: &SharedState) -> anyhow::Result<()> {
    let (outcome, trending) = tokio::join!(state.movies.load(""), state.tracker.trending());

    println!("Trending Searches:");
    println!("{:-<60}", "");
    print!("{}", render_trending(&trending));
    println!();

    println!("Popular Movies:");
    println!("{:-<60}", "");
    print_outcome(state, &outcome);

    Ok(())
}
