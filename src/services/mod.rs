pub mod counter_store;
pub use counter_store::{CounterStore, StoreError};

pub mod counter_store_impl;
pub use counter_store_impl::{AppwriteCounterStore, SeaOrmCounterStore, connect_counter_store};

pub mod search_tracker;
pub use search_tracker::{SearchTracker, TrackOutcome};

pub mod movie_service;
pub use movie_service::{LOAD_ERROR_MESSAGE, MovieService, SearchOutcome};

pub mod debounce;
pub use debounce::{Debouncer, SearchGeneration, Ticket};
