use std::net::SocketAddr;
use std::sync::Arc;

use rentis_api::{app, AppState};
use rentis_catalog::Catalog;
use rentis_flow::FlowController;
use rentis_store::{Db, SqliteBookingRepository, SqliteRenterRepository, SqliteTicketRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rentis_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = rentis_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Rentis API on port {}", config.server.port);

    let db = Db::connect(&config.database.url)
        .await
        .expect("Failed to open database");
    db.init_schema().await.expect("Failed to initialize schema");

    let flow = FlowController::new(
        Arc::new(Catalog::standard()),
        Arc::new(SqliteRenterRepository::new(db.pool.clone())),
        Arc::new(SqliteTicketRepository::new(db.pool.clone())),
        Arc::new(SqliteBookingRepository::new(db.pool.clone())),
        config.business_rules.entry_ticket_amount,
    );

    let app = app(AppState::new(Arc::new(flow)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
