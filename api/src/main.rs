use actix_web::{web, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;
use std::time::Duration;

use ea_api::{create_app, AppState};
use ea_core::services::{
    EmailSender, RateLimitPolicy, RateLimiter, RecordStore, VerificationService,
    VerificationServiceConfig,
};
use ea_infra::cache::{InMemoryRecordStore, RedisRecordStore};
use ea_infra::email::create_email_sender;
use ea_shared::{AppConfig, CacheBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting email-auth server");

    let config = AppConfig::from_env();
    info!("Environment: {:?}", config.environment);

    let store: Arc<dyn RecordStore> = match config.cache.backend {
        CacheBackend::Redis => Arc::new(
            RedisRecordStore::connect(config.cache.clone())
                .await
                .context("failed to connect the record store")?,
        ),
        CacheBackend::Memory => {
            log::warn!("Using the in-process record store; records are not shared between instances");
            let store = Arc::new(InMemoryRecordStore::new());
            if config.cache.purge_interval_seconds > 0 {
                store.spawn_reaper(Duration::from_secs(config.cache.purge_interval_seconds));
            }
            store
        }
    };

    let email: Arc<dyn EmailSender> =
        create_email_sender(&config.email).context("failed to configure email delivery")?;

    let service_config = VerificationServiceConfig::from(&config.verification)
        .with_email_subject(config.email.subject.clone());
    let verification_service = Arc::new(VerificationService::new(
        store.clone(),
        email,
        service_config,
    ));
    let rate_limiter = Arc::new(RateLimiter::new(
        store,
        RateLimitPolicy::from(&config.rate_limit),
    ));

    let app_state = web::Data::new(
        AppState::new(verification_service, rate_limiter)
            .with_trust_proxy_headers(config.rate_limit.trust_proxy_headers),
    );

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors = config.cors.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &cors));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
