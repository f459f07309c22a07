use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::{info, warn};

use econ_pulse::app;
use econ_pulse::config::AppConfig;
use econ_pulse::logging::{init_logging, LoggingConfig};
use econ_pulse::state::AppState;
use econ_pulse::store::{InMemorySeriesStore, PgSeriesStore, SeriesStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = AppConfig::from_env()?;

    let store: Arc<dyn SeriesStore> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(database_url)
                .await
                .context("failed to connect to DATABASE_URL")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("failed to apply migrations")?;

            info!("🗄️  Using Postgres indicator store");
            Arc::new(PgSeriesStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; serving an empty in-memory indicator store");
            Arc::new(InMemorySeriesStore::new())
        }
    };

    let state = AppState::new(store, config.analysis.clone());
    let app = app::create_app(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("🚀 Economic analysis backend running at http://{}/", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
