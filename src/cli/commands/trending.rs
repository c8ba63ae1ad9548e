use crate::state::SharedState;

use super::render::render_trending;

pub async fn cmd_trending(state: &SharedState, limit: Option<usize>) -> anyhow::Result<()> {
    let max = state.tracker.trending_limit();
    let limit = limit.unwrap_or(max);
    if limit == 0 || limit > max {
        anyhow::bail!("--limit must be between 1 and {max}");
    }

    let counters = state.tracker.trending_with_limit(limit).await;

    println!("Trending Searches:");
    println!("{:-<60}", "");
    print!("{}", render_trending(&counters));

    Ok(())
}
