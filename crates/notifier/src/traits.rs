//! Trait seams for the notifier core.
//!
//! These traits let the announce cycle and the channel gate run in tests
//! without a live Discord connection or TMDB access.

use async_trait::async_trait;
use thiserror::Error;
use tmdb::Movie;

use crate::announcement::Announcement;

/// Error type for outbound chat operations.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("channel {0} is not accessible")]
    ChannelUnavailable(u64),

    #[error("failed to deliver message: {0}")]
    Delivery(String),
}

/// Source of currently playing movies.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Fetch the first page of now-playing movies, in API order.
    async fn now_playing(&self) -> tmdb::Result<Vec<Movie>>;
}

/// Outbound operations against the chat backend.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Check that a channel exists and is reachable.
    async fn resolve_channel(&self, channel_id: u64) -> Result<(), DispatchError>;

    /// Send a plain text message to a channel.
    async fn send_text(&self, channel_id: u64, text: &str) -> Result<(), DispatchError>;

    /// Send one announcement card to a channel.
    async fn send_announcement(
        &self,
        channel_id: u64,
        announcement: &Announcement,
    ) -> Result<(), DispatchError>;
}
