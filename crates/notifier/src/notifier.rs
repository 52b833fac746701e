use std::sync::Arc;

use tmdb::Movie;

use crate::announcement::Announcement;
use crate::traits::{ChatGateway, MovieSource};

/// Number of movies announced per cycle.
const MAX_ANNOUNCEMENTS: usize = 5;

const APOLOGY_TEXT: &str = "Sorry, I couldn't fetch the latest movies at the moment.";
const CHANNEL_WARNING_TEXT: &str = "This bot only works in the designated channel!";

/// Orchestrates the fetch-then-announce cycle and the channel gate.
///
/// Stateless across invocations: each cycle fetches fresh, announces, and
/// forgets. Nothing is remembered between ticks, so a movie still playing
/// on the next tick is announced again.
pub struct Notifier {
    source: Arc<dyn MovieSource>,
    channel_id: u64,
}

impl Notifier {
    pub fn new(source: Arc<dyn MovieSource>, channel_id: u64) -> Self {
        Self { source, channel_id }
    }

    /// Fetch the newest now-playing movies, truncated to the first
    /// [`MAX_ANNOUNCEMENTS`] entries in API order.
    ///
    /// Never fails: any transport error, non-success status, or malformed
    /// payload is logged and collapsed to an empty list, so a broken
    /// upstream cannot take down a scheduled cycle.
    pub async fn fetch_latest_movies(&self) -> Vec<Movie> {
        match self.source.now_playing().await {
            Ok(mut movies) => {
                movies.truncate(MAX_ANNOUNCEMENTS);
                movies
            }
            Err(e) => {
                tracing::error!("Error fetching movies: {}", e);
                Vec::new()
            }
        }
    }

    /// Run one fetch-and-announce cycle against the destination channel.
    ///
    /// If the destination cannot be resolved the cycle no-ops. An empty
    /// fetch result sends a single apology text; the caller cannot tell a
    /// failed upstream from a genuinely empty listing, and neither can the
    /// channel. Each card dispatch is independent and best-effort: one
    /// failure never aborts the rest of the batch and is never retried.
    pub async fn announce_cycle(&self, gateway: &dyn ChatGateway) {
        if let Err(e) = gateway.resolve_channel(self.channel_id).await {
            tracing::warn!("Skipping announce cycle, destination unavailable: {}", e);
            return;
        }

        let movies = self.fetch_latest_movies().await;
        if movies.is_empty() {
            if let Err(e) = gateway.send_text(self.channel_id, APOLOGY_TEXT).await {
                tracing::warn!("Failed to send apology message: {}", e);
            }
            return;
        }

        let total = movies.len();
        let mut sent = 0usize;
        for movie in &movies {
            let announcement = Announcement::from_movie(movie);
            match gateway
                .send_announcement(self.channel_id, &announcement)
                .await
            {
                Ok(()) => sent += 1,
                Err(e) => {
                    tracing::warn!("Failed to announce '{}': {}", announcement.title, e);
                }
            }
        }

        tracing::info!("Announce cycle complete: {}/{} movies announced", sent, total);
    }

    /// Advisory gate restricting the bot to its configured channel.
    ///
    /// A message from any other channel gets a fixed warning reply and
    /// `false`; a message from the configured channel returns `true` with
    /// no side effect.
    pub async fn check_channel(&self, gateway: &dyn ChatGateway, source_channel: u64) -> bool {
        if source_channel != self.channel_id {
            if let Err(e) = gateway.send_text(source_channel, CHANNEL_WARNING_TEXT).await {
                tracing::warn!("Failed to send channel warning: {}", e);
            }
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tmdb::TmdbError;

    use super::*;
    use crate::traits::DispatchError;

    const CHANNEL: u64 = 42;

    struct MockMovieSource {
        movies: Vec<Movie>,
        fail: bool,
    }

    #[async_trait]
    impl MovieSource for MockMovieSource {
        async fn now_playing(&self) -> tmdb::Result<Vec<Movie>> {
            if self.fail {
                return Err(TmdbError::Api {
                    status_code: 500,
                    message: "upstream down".to_string(),
                });
            }
            Ok(self.movies.clone())
        }
    }

    #[derive(Debug, PartialEq)]
    enum Sent {
        Text { channel: u64, text: String },
        Card { channel: u64, card: Announcement },
    }

    #[derive(Default)]
    struct RecordingGateway {
        sent: Mutex<Vec<Sent>>,
        resolve_fails: bool,
        failing_card_titles: Vec<String>,
    }

    impl RecordingGateway {
        fn sent(self) -> Vec<Sent> {
            self.sent.into_inner().unwrap()
        }
    }

    #[async_trait]
    impl ChatGateway for RecordingGateway {
        async fn resolve_channel(&self, channel_id: u64) -> Result<(), DispatchError> {
            if self.resolve_fails {
                return Err(DispatchError::ChannelUnavailable(channel_id));
            }
            Ok(())
        }

        async fn send_text(&self, channel_id: u64, text: &str) -> Result<(), DispatchError> {
            self.sent.lock().unwrap().push(Sent::Text {
                channel: channel_id,
                text: text.to_string(),
            });
            Ok(())
        }

        async fn send_announcement(
            &self,
            channel_id: u64,
            announcement: &Announcement,
        ) -> Result<(), DispatchError> {
            if self.failing_card_titles.contains(&announcement.title) {
                return Err(DispatchError::Delivery("delivery refused".to_string()));
            }
            self.sent.lock().unwrap().push(Sent::Card {
                channel: channel_id,
                card: announcement.clone(),
            });
            Ok(())
        }
    }

    fn movie(title: &str) -> Movie {
        Movie {
            id: 1,
            title: title.to_string(),
            overview: format!("Synopsis of {}", title),
            poster_path: Some("/poster.jpg".to_string()),
            release_date: Some("2024-01-01".to_string()),
            ..Default::default()
        }
    }

    fn notifier_with(movies: Vec<Movie>) -> Notifier {
        Notifier::new(
            Arc::new(MockMovieSource {
                movies,
                fail: false,
            }),
            CHANNEL,
        )
    }

    fn failing_notifier() -> Notifier {
        Notifier::new(
            Arc::new(MockMovieSource {
                movies: Vec::new(),
                fail: true,
            }),
            CHANNEL,
        )
    }

    #[tokio::test]
    async fn fetch_truncates_to_five_preserving_order() {
        let movies: Vec<Movie> = (0..10).map(|i| movie(&format!("Movie {}", i))).collect();
        let notifier = notifier_with(movies);

        let fetched = notifier.fetch_latest_movies().await;
        assert_eq!(fetched.len(), 5);
        let titles: Vec<&str> = fetched.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Movie 0", "Movie 1", "Movie 2", "Movie 3", "Movie 4"]
        );
    }

    #[tokio::test]
    async fn fetch_returns_short_batches_unchanged() {
        let notifier = notifier_with(vec![movie("A"), movie("B")]);
        assert_eq!(notifier.fetch_latest_movies().await.len(), 2);
    }

    #[tokio::test]
    async fn fetch_collapses_upstream_failure_to_empty() {
        let notifier = failing_notifier();
        assert!(notifier.fetch_latest_movies().await.is_empty());
    }

    #[tokio::test]
    async fn empty_cycle_sends_exactly_one_apology() {
        let notifier = notifier_with(Vec::new());
        let gateway = RecordingGateway::default();

        notifier.announce_cycle(&gateway).await;

        let sent = gateway.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            Sent::Text {
                channel: CHANNEL,
                text: "Sorry, I couldn't fetch the latest movies at the moment.".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn failed_fetch_cycle_sends_same_apology() {
        let notifier = failing_notifier();
        let gateway = RecordingGateway::default();

        notifier.announce_cycle(&gateway).await;

        let sent = gateway.sent();
        assert_eq!(sent.len(), 1);
        assert!(matches!(&sent[0], Sent::Text { text, .. }
            if text == "Sorry, I couldn't fetch the latest movies at the moment."));
    }

    #[tokio::test]
    async fn cycle_sends_one_card_per_movie_in_order() {
        let notifier = notifier_with(vec![movie("A"), movie("B"), movie("C")]);
        let gateway = RecordingGateway::default();

        notifier.announce_cycle(&gateway).await;

        let sent = gateway.sent();
        assert_eq!(sent.len(), 3);
        for (entry, expected) in sent.iter().zip(["A", "B", "C"]) {
            match entry {
                Sent::Card { channel, card } => {
                    assert_eq!(*channel, CHANNEL);
                    assert_eq!(card.title, expected);
                }
                other => panic!("expected card, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn truncated_cycle_announces_five_with_placeholder_description() {
        let mut movies: Vec<Movie> = (0..10).map(|i| movie(&format!("Movie {}", i))).collect();
        movies[0].overview.clear();
        let notifier = notifier_with(movies);
        let gateway = RecordingGateway::default();

        notifier.announce_cycle(&gateway).await;

        let sent = gateway.sent();
        assert_eq!(sent.len(), 5);
        match &sent[0] {
            Sent::Card { card, .. } => {
                assert_eq!(card.description, "No description available.");
            }
            other => panic!("expected card, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn dispatch_failure_does_not_abort_remaining_sends() {
        let notifier = notifier_with(vec![movie("A"), movie("B"), movie("C")]);
        let gateway = RecordingGateway {
            failing_card_titles: vec!["B".to_string()],
            ..Default::default()
        };

        notifier.announce_cycle(&gateway).await;

        let sent = gateway.sent();
        assert_eq!(sent.len(), 2);
        assert!(matches!(&sent[0], Sent::Card { card, .. } if card.title == "A"));
        assert!(matches!(&sent[1], Sent::Card { card, .. } if card.title == "C"));
    }

    #[tokio::test]
    async fn unresolvable_destination_sends_nothing() {
        let notifier = notifier_with(vec![movie("A")]);
        let gateway = RecordingGateway {
            resolve_fails: true,
            ..Default::default()
        };

        notifier.announce_cycle(&gateway).await;

        assert!(gateway.sent().is_empty());
    }

    #[tokio::test]
    async fn gate_warns_and_rejects_foreign_channel() {
        let notifier = notifier_with(Vec::new());
        let gateway = RecordingGateway::default();

        let accepted = notifier.check_channel(&gateway, 7).await;

        assert!(!accepted);
        let sent = gateway.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            Sent::Text {
                channel: 7,
                text: "This bot only works in the designated channel!".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn gate_accepts_configured_channel_silently() {
        let notifier = notifier_with(Vec::new());
        let gateway = RecordingGateway::default();

        let accepted = notifier.check_channel(&gateway, CHANNEL).await;

        assert!(accepted);
        assert!(gateway.sent().is_empty());
    }
}
