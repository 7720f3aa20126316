use dotenvy::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use events_server::config::Config;
use events_server::mail::SmtpRelay;
use events_server::routes::create_routes;
use events_server::state::AppState;
use events_server::store::PgEventStore;

const DEFAULT_LOG_FILTER: &str = "events_server=info,tower_http=info";

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    let store = PgEventStore::connect(&config.database)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Successfully connected to database");

    let mailer = SmtpRelay::new(&config.mail).expect("Failed to configure mail relay");

    tokio::fs::create_dir_all(&config.uploads.dir)
        .await
        .expect("Failed to create upload directory");

    let state = AppState::new(Arc::new(store), Arc::new(mailer), config.uploads.clone());
    let app = create_routes(state, &config);

    let addr = config.server.addr;
    tracing::info!(
        "Server running at http://{}{}",
        addr,
        config.server.base_path
    );

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
