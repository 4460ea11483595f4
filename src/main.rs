use sqlx::postgres::PgPoolOptions;

use smartqueue_api::api::{self, AppState};
use smartqueue_api::config::Settings;
use smartqueue_api::infrastructure::repositories::postgres_repositories;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let settings = Settings::from_env().expect("Invalid configuration");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_max_connections)
        .connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Database connected successfully");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let oracle = settings
        .oracle
        .build_client()
        .expect("Failed to build prediction oracle client");

    let state = AppState::new(postgres_repositories(pool), oracle);
    let app = api::router(state);

    // Start server
    tracing::info!("Server listening on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
