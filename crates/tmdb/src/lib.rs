mod client;
mod error;
mod now_playing;
pub mod models;

pub use client::TmdbClient;
pub use error::TmdbError;
pub use models::{Movie, PaginatedResponse};

pub type Result<T> = std::result::Result<T, TmdbError>;
