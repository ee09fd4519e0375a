use actix_web::{web, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tafea_api::{app::create_app, routes::auth::AppState};
use tafea_core::services::{
    AuthService, InMemoryOtpStore, MailServiceTrait, OtpServiceConfig, OtpStore, TokenService,
    TokenServiceConfig,
};
use tafea_infra::cache::RedisOtpStore;
use tafea_infra::mail::{create_mail_service, MailServiceAdapter};
use tafea_shared::config::LogFormat;
use tafea_shared::{AppConfig, LoggingConfig, OtpStoreBackend};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    tracing::info!(environment = %config.environment, "Starting TAFEA API server");

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;
    if config.jwt.is_using_default_secret() {
        tracing::warn!("JWT_SECRET is not set; using the development default");
    }

    let token_config =
        TokenServiceConfig::try_from(&config.jwt).context("Invalid JWT configuration")?;
    let token_service =
        Arc::new(TokenService::new(token_config).context("Failed to create token service")?);

    let mail_service = create_mail_service(&config.mail, config.environment)
        .context("Failed to create mail service")?;
    let mail_service = MailServiceAdapter::new(mail_service);
    tracing::info!(provider = mail_service.provider_name(), "Mail service ready");
    let mail_service = Arc::new(mail_service);

    // Store type is fixed at startup, so the server is built once per backend
    match config.otp.store_backend {
        OtpStoreBackend::Memory => {
            tracing::info!("Using in-memory OTP store");
            let store = Arc::new(InMemoryOtpStore::new());
            run_server(store, mail_service, token_service, &config).await
        }
        OtpStoreBackend::Redis => {
            let store = RedisOtpStore::from_config(&config.otp)
                .await
                .context("Failed to connect to the Redis OTP store")?;
            tracing::info!(key_prefix = %config.otp.key_prefix, "Using Redis OTP store");
            run_server(Arc::new(store), mail_service, token_service, &config).await
        }
    }
}

async fn run_server<S, M>(
    store: Arc<S>,
    mail_service: Arc<M>,
    token_service: Arc<TokenService>,
    config: &AppConfig,
) -> Result<()>
where
    S: OtpStore + 'static,
    M: MailServiceTrait + 'static,
{
    let auth_service = Arc::new(AuthService::new(
        store,
        mail_service,
        token_service,
        OtpServiceConfig::from(&config.otp),
    ));
    let app_state = web::Data::new(AppState::new(auth_service));
    let environment = config.environment;

    let mut server = HttpServer::new(move || create_app(app_state.clone(), environment));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server listening");

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_file(logging.source_location)
                    .with_line_number(logging.source_location),
            )
            .init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).init(),
    }
}
