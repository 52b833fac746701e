use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serenity::all::{Client, Context, EventHandler, GatewayIntents, Message, Ready};
use serenity::async_trait;
use tmdb::TmdbClient;

use crate::adapters::TmdbMovieSource;
use crate::announce_job::AnnounceJob;
use crate::config::Config;
use crate::discord::DiscordGateway;
use crate::notifier::Notifier;
use crate::scheduler::SchedulerService;

struct Handler {
    notifier: Arc<Notifier>,
    scheduler_started: AtomicBool,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("Logged in as {}", ready.user.name);

        // ready fires again on gateway reconnects; start the scheduler once
        if self.scheduler_started.swap(true, Ordering::SeqCst) {
            return;
        }

        let gateway = Arc::new(DiscordGateway::new(ctx.http.clone()));
        SchedulerService::new()
            .with_job(AnnounceJob::new(Arc::clone(&self.notifier), gateway))
            .start();
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let gateway = DiscordGateway::new(ctx.http.clone());
        self.notifier
            .check_channel(&gateway, msg.channel_id.get())
            .await;
    }
}

/// Build every collaborator and run the Discord client until the process
/// is terminated.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let http_client = reqwest::Client::new();
    let tmdb = Arc::new(TmdbClient::with_client(http_client, &config.tmdb_api_key));
    let source = Arc::new(TmdbMovieSource::new(tmdb));
    let notifier = Arc::new(Notifier::new(source, config.channel_id));

    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;
    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(Handler {
            notifier,
            scheduler_started: AtomicBool::new(false),
        })
        .await?;

    client.start().await?;
    Ok(())
}
