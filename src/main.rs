use std::sync::Arc;

use drinks_api::app::{app, AppState};
use drinks_api::auth::TokenVerifier;
use drinks_api::config;
use drinks_api::database::DrinkStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH_DOMAIN, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drinks_api=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting Drinks API in {:?} mode", config.environment);

    let store = DrinkStore::connect(&config.database.url, config.database.max_connections)
        .await
        .unwrap_or_else(|e| panic!("failed to open database {}: {}", config.database.url, e));
    store
        .init(config.database.recreate_on_start)
        .await
        .expect("failed to initialize drinks table");

    let state = AppState {
        store,
        verifier: Arc::new(TokenVerifier::new(&config.auth)),
    };

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Drinks API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.expect("server");
}
