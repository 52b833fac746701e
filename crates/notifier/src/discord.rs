use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{ChannelId, CreateEmbed, CreateEmbedFooter, CreateMessage};
use serenity::http::Http;

use crate::announcement::Announcement;
use crate::traits::{ChatGateway, DispatchError};

/// [`ChatGateway`] backed by the Discord REST API.
pub struct DiscordGateway {
    http: Arc<Http>,
}

impl DiscordGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

fn build_message(announcement: &Announcement) -> CreateMessage {
    let mut embed = CreateEmbed::new()
        .title(&announcement.title)
        .description(&announcement.description)
        .colour(announcement.accent_color)
        .footer(CreateEmbedFooter::new(&announcement.footer));

    if let Some(url) = &announcement.image_url {
        embed = embed.image(url);
    }

    CreateMessage::new().embed(embed)
}

#[async_trait]
impl ChatGateway for DiscordGateway {
    async fn resolve_channel(&self, channel_id: u64) -> Result<(), DispatchError> {
        ChannelId::new(channel_id)
            .to_channel(&self.http)
            .await
            .map(|_| ())
            .map_err(|_| DispatchError::ChannelUnavailable(channel_id))
    }

    async fn send_text(&self, channel_id: u64, text: &str) -> Result<(), DispatchError> {
        ChannelId::new(channel_id)
            .say(&self.http, text)
            .await
            .map(|_| ())
            .map_err(|e| DispatchError::Delivery(e.to_string()))
    }

    async fn send_announcement(
        &self,
        channel_id: u64,
        announcement: &Announcement,
    ) -> Result<(), DispatchError> {
        ChannelId::new(channel_id)
            .send_message(&self.http, build_message(announcement))
            .await
            .map(|_| ())
            .map_err(|e| DispatchError::Delivery(e.to_string()))
    }
}
