use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod accounts;
mod database;
mod error;
mod forms;
mod middleware;
mod models;
mod password;
mod repositories;
mod routes;
mod session;
mod settings;
mod state;
mod validation;
mod views;

use common::database::{health_check, init_pool};

use crate::{settings::Settings, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting cafe directory");

    let settings = Settings::new()?;

    // Initialize database connection pool
    let pool = init_pool(&settings.database_config()).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    database::init_schema(&pool).await?;

    let app_state = AppState::new(pool, &settings);
    info!("Admin user ids: {:?}", app_state.admins.ids());

    // Start the web server
    let app = routes::create_router(app_state);

    let bind_addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Cafe directory listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
