//! Composition root: load configuration, wire adapters, serve HTTP.

use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use webinar_registration::adapters::http::{app_router, AppOptions, AppState};
use webinar_registration::adapters::{
    InMemoryOtpStore, InMemoryRegistrationStore, InMemorySettingsStore, JwtAdminTokens,
    LogMailer, PostgresOtpStore, PostgresRegistrationStore, PostgresSettingsStore,
    RazorpayConfig, RazorpayOrderClient, SmtpMailer,
};
use webinar_registration::config::AppConfig;
use webinar_registration::domain::payment::SignatureVerifier;
use webinar_registration::ports::{Mailer, OtpStore, RegistrationStore, SettingsStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

struct Stores {
    registrations: Arc<dyn RegistrationStore>,
    settings: Arc<dyn SettingsStore>,
    otp: Arc<dyn OtpStore>,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        razorpay_test_mode = config.payment.is_test_mode(),
        "Starting webinar registration service"
    );

    let stores = connect_stores(&config).await?;
    let verifier = SignatureVerifier::new(
        config.payment.razorpay_key_secret.clone(),
        config.payment.razorpay_webhook_secret.clone(),
    )?;
    let gateway = RazorpayOrderClient::new(RazorpayConfig::from_app_config(&config.payment))?;

    let state = AppState {
        registrations: stores.registrations,
        settings: stores.settings,
        otp_store: stores.otp,
        gateway: Arc::new(gateway),
        mailer: build_mailer(&config)?,
        admin_tokens: Arc::new(JwtAdminTokens::new(
            admin_token_secret(&config),
            config.admin.token_ttl_minutes,
        )),
        verifier,
        options: Arc::new(AppOptions::from_config(&config)),
    };

    let app = app_router(state, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON lines in production, human-readable otherwise. `RUST_LOG` wins
/// over `server.log_level` when set.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "webinar_registration={level},tower_http={level}",
            level = config.server.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn connect_stores(config: &AppConfig) -> Result<Stores, BoxError> {
    if !config.database.is_configured() {
        tracing::warn!("No database configured; using in-memory stores");
        return Ok(Stores {
            registrations: Arc::new(InMemoryRegistrationStore::new()),
            settings: Arc::new(InMemorySettingsStore::new()),
            otp: Arc::new(InMemoryOtpStore::new()),
        });
    }

    let db = &config.database;
    let pool = PgPoolOptions::new()
        .min_connections(db.min_connections)
        .max_connections(db.max_connections)
        .acquire_timeout(db.acquire_timeout())
        .idle_timeout(db.idle_timeout())
        .max_lifetime(db.max_lifetime())
        .connect(&db.url)
        .await?;

    if db.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(Stores {
        registrations: Arc::new(PostgresRegistrationStore::new(pool.clone())),
        settings: Arc::new(PostgresSettingsStore::new(pool.clone())),
        otp: Arc::new(PostgresOtpStore::new(pool)),
    })
}

fn build_mailer(config: &AppConfig) -> Result<Arc<dyn Mailer>, BoxError> {
    if config.email.enabled && config.email.smtp_ready() {
        tracing::info!(host = %config.email.smtp_host, "Using SMTP mailer");
        return Ok(Arc::new(SmtpMailer::new(&config.email)?));
    }
    tracing::warn!("SMTP not configured; emails will only be logged");
    Ok(Arc::new(LogMailer::new()))
}

/// Configured secret, or a per-process random one outside production.
/// Validation has already rejected an empty secret in production.
fn admin_token_secret(config: &AppConfig) -> String {
    if !config.admin.token_secret.is_empty() {
        return config.admin.token_secret.clone();
    }
    tracing::warn!("No admin token secret configured; admin tokens will not survive a restart");
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
