use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Announces now-playing movies to a Discord channel", long_about = None)]
struct Cli {
    /// Env file to load before reading configuration
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => {
            dotenvy::from_path(path)?;
        }
        None => {
            // a missing .env is fine, the environment may be set directly
            dotenvy::dotenv().ok();
        }
    }

    tracing::info!("marquee {}", env!("APP_VERSION"));

    let config = notifier::Config::from_env()?;
    notifier::run(config).await
}
