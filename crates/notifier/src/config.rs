use std::env;

use anyhow::Context;

/// Process-wide configuration, read once at startup and immutable for the
/// lifetime of the process.
#[derive(Debug, Clone)]
pub struct Config {
    /// Token authenticating the process to Discord.
    pub discord_token: String,
    /// API key sent with every TMDB request.
    pub tmdb_api_key: String,
    /// The single channel that receives announcements and passes the gate.
    pub channel_id: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let channel_id: u64 = required("ALLOWED_CHANNEL_ID")?
            .parse()
            .context("ALLOWED_CHANNEL_ID must be a numeric channel id")?;
        // Discord channel ids are non-zero snowflakes
        if channel_id == 0 {
            anyhow::bail!("ALLOWED_CHANNEL_ID must be non-zero");
        }

        Ok(Self {
            discord_token: required("DISCORD_BOT_TOKEN")?,
            tmdb_api_key: required("TMDB_API_KEY")?,
            channel_id,
        })
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).with_context(|| format!("missing required env var {}", name))
}
