use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::sync::mpsc;
use tracing::debug;

use crate::services::{Debouncer, SearchGeneration, SearchOutcome, Ticket};
use crate::state::SharedState;

use super::render::render_trending;
use super::search::print_outcome;

const QUIT: &str = ":q";

/// Search-as-you-type over stdin. Every line stands for the whole contents of
/// the search box; a fetch starts once the input has been quiet for
/// `search.debounce_ms`, and only the answer for the latest line is shown.
pub async fn cmd_interactive(state: Arc<SharedState>) -> anyhow::Result<()> {
    let (outcome, trending) = tokio::join!(state.movies.load(""), state.tracker.trending());

    println!("Trending Searches:");
    print!("{}", render_trending(&trending));
    println!();
    println!("Popular Movies:");
    print_outcome(&state, &outcome);
    println!("Type to search, empty line for popular movies, {QUIT} to quit.");

    let debouncer = Debouncer::new(Duration::from_millis(state.config.search.debounce_ms));
    let generation = SearchGeneration::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<(Ticket, SearchOutcome)>();
    let mut tx = Some(tx);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line(), if tx.is_some() => {
                match line? {
                    Some(line) if line.trim() == QUIT => break,
                    Some(line) => {
                        let Some(sender) = tx.clone() else { continue };
                        let ticket = generation.issue(&line);
                        let movies = state.movies.clone();
                        debouncer.schedule(async move {
                            let outcome = movies.load(&ticket.query).await;
                            let _ = sender.send((ticket, outcome));
                        });
                    }
                    // End of input: let the pending search finish, then stop.
                    None => tx = None,
                }
            }
            received = rx.recv() => {
                let Some(response) = received else { break };
                let Some((ticket, outcome)) = take_current(&generation, response) else {
                    continue;
                };
                println!();
                if ticket.query.trim().is_empty() {
                    println!("Popular Movies:");
                } else {
                    println!("Results for: {}", ticket.query);
                }
                print_outcome(&state, &outcome);
            }
            _ = signal::ctrl_c() => break,
        }
    }

    debouncer.cancel();
    Ok(())
}

/// Passes a response through only when it answers the latest input.
fn take_current(
    generation: &SearchGeneration,
    response: (Ticket, SearchOutcome),
) -> Option<(Ticket, SearchOutcome)> {
    if generation.is_current(&response.0) {
        Some(response)
    } else {
        debug!(query = %response.0.query, "Discarding stale search response");
        None
    }
}
