//! Concrete implementations of the notifier trait seams.

use std::sync::Arc;

use async_trait::async_trait;
use tmdb::{Movie, TmdbClient};

use crate::traits::MovieSource;

/// [`MovieSource`] backed by the TMDB now-playing endpoint, first page only.
pub struct TmdbMovieSource {
    client: Arc<TmdbClient>,
}

impl TmdbMovieSource {
    pub fn new(client: Arc<TmdbClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MovieSource for TmdbMovieSource {
    async fn now_playing(&self) -> tmdb::Result<Vec<Movie>> {
        let page = self.client.now_playing(1).await?;
        Ok(page.results)
    }
}
