mod discover;
mod init;
mod interactive;
mod render;
mod search;
mod serve;
mod trending;

pub use discover::cmd_discover;
pub use init::cmd_init;
pub use interactive::cmd_interactive;
pub use render::{render_movie_grid, render_trending};
pub use search::cmd_search;
pub use serve::cmd_serve;
pub use trending::cmd_trending;
