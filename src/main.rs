use std::sync::Arc;

use axum::Router;
use secrecy::Secret;
use sqlx::postgres::PgPoolOptions;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jurconsult_bot::adapters::ai::{OpenAiConfig, OpenAiGenerator};
use jurconsult_bot::adapters::telegram::{
    webhook_routes, TelegramApi, TelegramApiConfig, WebhookState,
};
use jurconsult_bot::adapters::transcript::{NoopTranscriptSink, PgTranscriptSink};
use jurconsult_bot::application::{DialogueController, ReplyEngine};
use jurconsult_bot::config::AppConfig;
use jurconsult_bot::domain::foundation::ChatId;
use jurconsult_bot::domain::knowledge::DomainKnowledge;
use jurconsult_bot::domain::session::SessionStore;
use jurconsult_bot::ports::TranscriptSink;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = AppConfig::load().expect("failed to load configuration");
    config.validate().expect("invalid configuration");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        environment = %config.server.environment,
        jurisdiction = %config.consulting.default_jurisdiction,
        "starting presale bot"
    );

    // Either branch yields the same router; only the transcript sink
    // differs, and with it the state's type parameters.
    let app = match &config.database {
        Some(database) => {
            let pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .acquire_timeout(database.acquire_timeout())
                .connect(&database.url)
                .await
                .expect("failed to connect to database");

            if database.run_migrations {
                tracing::info!("Running database migrations...");
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .expect("failed to run migrations");
            }

            build_router(&config, Arc::new(PgTranscriptSink::new(pool)))
        }
        None => {
            tracing::warn!("no database configured, transcripts will not be persisted");
            build_router(&config, Arc::new(NoopTranscriptSink))
        }
    };

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.server.request_timeout()));

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}

/// Wires engine, controller and webhook routes around one transcript sink.
fn build_router<T>(config: &AppConfig, transcript: Arc<T>) -> Router
where
    T: TranscriptSink + 'static,
{
    let knowledge = Arc::new(DomainKnowledge::with_jurisdiction(
        config.consulting.default_jurisdiction.clone(),
    ));
    let sessions = Arc::new(SessionStore::new());

    let generator = Arc::new(OpenAiGenerator::new(
        OpenAiConfig::new(config.ai.api_key.clone())
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout()),
    ));

    let messenger = Arc::new(TelegramApi::new(
        TelegramApiConfig::new(config.telegram.bot_token.clone())
            .with_base_url(config.telegram.api_base_url.clone())
            .with_timeout(config.telegram.timeout()),
    ));

    let engine = ReplyEngine::new(sessions, knowledge, generator, transcript)
        .with_generation_bounds(config.ai.max_output_tokens, config.ai.temperature);

    let mut controller = DialogueController::new(engine, messenger);
    if let Some(chat) = config.telegram.sales_manager_chat_id {
        controller = controller.with_sales_manager(ChatId::new(chat));
    }

    let state = WebhookState::new(
        Arc::new(controller),
        Secret::new(config.telegram.webhook_secret.clone()),
    );

    webhook_routes().with_state(state)
}
