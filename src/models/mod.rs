pub mod movie;
pub mod search_counter;

pub use movie::{Movie, MovieId};
pub use search_counter::{NewSearchCounter, SearchCounter, normalize_term};
