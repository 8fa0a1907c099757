use std::net::SocketAddr;
use std::sync::Arc;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use appointment_cell::services::booking::BookingService;
use appointment_cell::services::ledger::AppointmentLedger;
use appointment_cell::AppointmentCellState;
use provider_cell::services::availability::AvailabilityCalendar;
use provider_cell::services::directory::ProviderDirectory;
use provider_cell::services::source::HttpProviderSource;
use provider_cell::ProviderCellState;
use shared_config::AppConfig;

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Carebook API server");

    // Load configuration
    let config = AppConfig::from_env();

    // Assemble the booking engine: directory, calendar, ledger, coordinator
    let directory = Arc::new(ProviderDirectory::new());
    let calendar = Arc::new(AvailabilityCalendar::new());
    let ledger = Arc::new(AppointmentLedger::new(Arc::clone(&calendar)));
    let booking = Arc::new(BookingService::new(
        Arc::clone(&directory),
        Arc::clone(&calendar),
        Arc::clone(&ledger),
    ));
    let source = Arc::new(HttpProviderSource::new(&config));

    // Initial wholesale directory load; the server still starts on failure
    // and the directory can be refreshed later.
    if config.is_configured() {
        match directory.load_from(source.as_ref()).await {
            Ok(report) => info!(
                "Initial directory load: {} providers, {} quarantined",
                report.loaded, report.quarantined
            ),
            Err(e) => warn!("Initial directory load failed: {}", e),
        }
    }

    let provider_state = Arc::new(ProviderCellState {
        directory,
        calendar,
        source,
    });
    let appointment_state = Arc::new(AppointmentCellState { booking, ledger });

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(provider_state, appointment_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.bind_port));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await.expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
