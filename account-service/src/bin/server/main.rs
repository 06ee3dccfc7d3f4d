use std::sync::Arc;
use std::time::Duration;

use account_service::config::Config;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::pages::VerificationPages;
use account_service::inbound::http::router::create_router;
use account_service::outbound::email::SmtpVerificationMailer;
use account_service::outbound::repositories::PostgresAccountRepository;
use auth::TokenService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        public_url = %config.server.public_url,
        smtp_host = %config.smtp.host,
        smtp_port = config.smtp.port,
        jwt_expiration_hours = config.jwt.expiration_hours,
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

    let token_service = Arc::new(TokenService::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::hours(config.jwt.expiration_hours),
    ));
    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool));
    let mailer = Arc::new(SmtpVerificationMailer::new(&config.smtp)?);

    // Startup continues either way; signups fail until the relay is reachable
    match mailer.check_connection().await {
        Ok(()) => tracing::info!(smtp_host = %config.smtp.host, "Mail relay ready"),
        Err(e) => tracing::error!(
            smtp_host = %config.smtp.host,
            error = %e,
            "Mail relay check failed"
        ),
    }

    let account_service = Arc::new(AccountService::new(
        account_repository,
        mailer,
        Arc::clone(&token_service),
        config.server.public_url.clone(),
    ));

    let pages = VerificationPages::new(
        config.verification.login_url.clone(),
        Duration::from_secs(config.verification.redirect_delay_seconds),
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, token_service, pages);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
