pub mod appwrite;
pub mod tmdb;
