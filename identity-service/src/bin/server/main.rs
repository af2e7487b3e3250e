use std::sync::Arc;

use auth::TokenCodec;
use identity_service::config::Config;
use identity_service::domain::auth::ports::RateLimiter;
use identity_service::domain::auth::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::rate_limit::FixedWindowRateLimiter;
use identity_service::outbound::rate_limit::NoopRateLimiter;
use identity_service::outbound::repositories::PostgresRefreshTokenStore;
use identity_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_expire_minutes = config.auth.access_token_expire_minutes,
        refresh_token_expire_days = config.auth.refresh_token_expire_days,
        rate_limiting = config.rate_limit.is_some(),
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let codec = Arc::new(TokenCodec::new(config.auth.secret.as_bytes()));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let refresh_token_store = Arc::new(PostgresRefreshTokenStore::new(pg_pool));

    // No budget configured means the no-op limiter, never a missing feature
    let rate_limiter: Arc<dyn RateLimiter> = match &config.rate_limit {
        Some(rate_limit) => Arc::new(FixedWindowRateLimiter::new(rate_limit.per_minute)),
        None => Arc::new(NoopRateLimiter),
    };

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        refresh_token_store,
        rate_limiter,
        codec,
        config.auth.access_token_expire_minutes,
        config.auth.refresh_token_expire_days,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(auth_service);
    axum::serve(http_listener, application).await?;

    Ok(())
}
