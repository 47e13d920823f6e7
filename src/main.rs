//! Fleetline server binary
//!
//! Reads configuration from TOML file (~/.config/fleetline/config.toml),
//! runs migrations and serves the REST API.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use fleetline::application::services::{
    start_ticket_expiry_task, BookingService, DiscountService, TicketingService, TripService,
};
use fleetline::config::AppConfig;
use fleetline::domain::RepositoryProvider;
use fleetline::infrastructure::crypto::jwt::JwtConfig;
use fleetline::infrastructure::database::migrator::Migrator;
use fleetline::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use fleetline::{
    create_api_router, default_config_path, init_database, AppState, AuthState, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("FLEETLINE_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg);
            info!("Using default configuration ({})", e);
            cfg
        }
    };

    info!("Starting Fleetline back office...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    if let Err(e) = metrics_exporter_prometheus::PrometheusBuilder::new().install() {
        error!("Failed to install Prometheus metrics exporter: {}", e);
    } else {
        info!("Prometheus metrics exporter installed");
    }

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: config.database.connection_url(),
    };
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Services ───────────────────────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
    let ticketing = Arc::new(
        TicketingService::new(repos.clone()).with_reservation_ttl(chrono::Duration::hours(
            config.booking.reservation_ttl_hours,
        )),
    );
    let state = AppState {
        trips: Arc::new(TripService::new(repos.clone())),
        ticketing: ticketing.clone(),
        bookings: Arc::new(BookingService::new(repos.clone())),
        discounts: Arc::new(DiscountService::new(repos.clone())),
        repos,
    };

    let auth_state = AuthState {
        jwt_config: JwtConfig {
            secret: config.security.jwt_secret.clone(),
            issuer: config.security.jwt_issuer.clone(),
        },
    };

    // ── Background tasks ───────────────────────────────────────
    let shutdown = ShutdownSignal::new();
    start_ticket_expiry_task(
        ticketing,
        shutdown.clone(),
        config.booking.expiry_check_interval_secs,
    );
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    // ── HTTP server ────────────────────────────────────────────
    let app = create_api_router(state, auth_state);
    let address = config.server.address();
    info!("REST API listening on http://{}", address);
    info!("Swagger UI at http://{}/swagger-ui", address);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    let server_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { server_shutdown.wait().await })
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();
}
