//! ShareIt server - business tier binary

use axum_helpers::server::{
    ShutdownCoordinator, create_production_app, create_router, health_router,
};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL at {}", config.database.url());

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name)
        .await
        .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;

    let api_routes = api::routes(&db);
    let router = create_router::<openapi::ApiDoc>(api_routes, &config.environment);
    let app = router
        .merge(health_router(config.app))
        .merge(api::ready_router(db.clone()));

    info!("Starting ShareIt server on port {}", config.server.port);

    let coordinator = ShutdownCoordinator::new();
    create_production_app(app, &config.server, coordinator)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shutting down: closing database connection");
    match db.close().await {
        Ok(()) => info!("PostgreSQL connection closed"),
        Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
    }

    info!("ShareIt server shutdown complete");
    Ok(())
}
