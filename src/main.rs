use std::sync::Arc;

use teloxide::Bot;
use tracing_subscriber::EnvFilter;

use pansaver::bot;
use pansaver::config;
use pansaver::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    config.print_summary();

    let state = Arc::new(AppState::from_config(&config));
    let telegram = Bot::new(&config.bot_token);

    bot::run(telegram, state).await
}
