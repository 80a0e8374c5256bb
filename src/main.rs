use std::sync::Arc;

use dotenvy::dotenv;
use envconfig::Envconfig;
use hospital::{
    app::{build_router, AppState},
    auth::TokenIssuer,
    config::Config,
    db::init_db,
    services::{booking::BookingPolicy, mirror::Mirror, seed::seed_sample_doctors},
    store::{postgres::PostgresStore, HospitalStore},
};

type Error = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize the logger with default settings or "info" level if not specified
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    log::info!("Starting the hospital scheduling service...");

    // Load environment variables from a .env file if present
    dotenv().ok();

    let config = Config::init_from_env()?;
    config.validate()?;
    let addr = config.socket_addr()?;

    let pool = init_db(&config.database_url).await?;
    let store: Arc<dyn HospitalStore> = Arc::new(PostgresStore::new(pool));
    log::info!("Using {} store", store.backend_name());

    if config.seed_on_startup {
        seed_sample_doctors(store.as_ref()).await?;
    }

    let mut state = AppState::new(store);
    state.booking_policy = BookingPolicy {
        enforce_availability: config.enforce_availability,
    };
    state.cors_origins = config.cors_origins();

    if config.require_auth {
        if let Some(secret) = config.jwt_secret() {
            state.tokens = Some(TokenIssuer::new(secret, config.token_ttl()?));
        }
    } else {
        log::warn!("REQUIRE_AUTH is false: doctor and appointment routes are open");
    }

    if let Some((url, key)) = config.mirror() {
        log::info!("Mirroring writes to {}", url);
        state.mirror = Some(Mirror::new(url, key)?);
    }

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("Shutting down gracefully");
        })
        .await?;

    Ok(())
}
