//! One-shot webhook registration.
//!
//! Points the bot at the configured public URL. Run once per deploy,
//! after the server is reachable: `cargo run --bin set-webhook`.

use jurconsult_bot::adapters::telegram::{TelegramApi, TelegramApiConfig};
use jurconsult_bot::config::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("failed to load configuration");
    config.validate().expect("invalid configuration");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let public_url = config
        .telegram
        .public_url
        .as_deref()
        .expect("JURCONSULT__TELEGRAM__PUBLIC_URL must be set to register the webhook");

    let api = TelegramApi::new(
        TelegramApiConfig::new(config.telegram.bot_token.clone())
            .with_base_url(config.telegram.api_base_url.clone())
            .with_timeout(config.telegram.timeout()),
    );

    match api
        .set_webhook(public_url, &config.telegram.webhook_secret)
        .await
    {
        Ok(description) => {
            tracing::info!(url = %public_url, description = %description, "webhook registered");
        }
        Err(error) => {
            tracing::error!(error = %error, "failed to register webhook");
            std::process::exit(1);
        }
    }
}
