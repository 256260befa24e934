//! GlowOnCall Booking Server
//!
//! REST API server for the GlowOnCall home beauty service booking flow.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glowoncall_server::{api, config::AppConfig, services::Services, store::Store, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing: stdout plus a daily rolling file
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("glowoncall_server={},tower_http=debug", config.logging.level).into()
    });

    let file_appender = tracing_appender::rolling::daily("logs", "glowoncall.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .init();

    tracing::info!("Starting GlowOnCall Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Catalog: {} services, advance {}%",
        config.catalog.len(),
        config.booking.advance_percent
    );

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create stores and services; bookings live in memory only
    let store = Store::new();
    let services = Services::new(&config, store);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Service catalog
        .route("/services", get(api::catalog::list_services))
        .route("/services/:slug", get(api::catalog::get_service))
        .route("/services/:slug/quote", get(api::catalog::quote_service))
        // Booking sessions
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings/:id", get(api::bookings::get_booking))
        .route("/bookings/:id", delete(api::bookings::discard_booking))
        .route(
            "/bookings/:id/fields/:field",
            put(api::bookings::update_field),
        )
        .route("/bookings/:id/submit", post(api::bookings::submit_booking))
        .route("/bookings/:id/confirm", post(api::bookings::confirm_booking))
        // Location
        .route("/location/map-url", post(api::location::map_url))
        // Contact
        .route("/contact", post(api::contact::send_message))
        // Referral
        .route("/referral", get(api::referral::get_referral))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
