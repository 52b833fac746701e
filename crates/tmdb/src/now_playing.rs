use crate::{
    models::{Movie, PaginatedResponse},
    TmdbClient,
};

impl TmdbClient {
    /// Get movies currently playing in theatres.
    ///
    /// GET /movie/now_playing
    pub async fn now_playing(&self, page: i64) -> crate::Result<PaginatedResponse<Movie>> {
        let url = self.url("/movie/now_playing");
        let page = page.to_string();
        let response = self
            .client()
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.lang.as_str()),
                ("page", page.as_str()),
            ])
            .send()
            .await?;
        self.handle_response(response).await
    }
}
