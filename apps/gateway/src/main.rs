//! ShareIt gateway - validation and forwarding tier binary

use axum_helpers::server::{
    ShutdownCoordinator, create_production_app, create_router, health_router,
};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod proxy;

use config::Config;
use proxy::ServerClient;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Forwarding to ShareIt server at {}", config.server_url);

    let client = ServerClient::new(&config.server_url);
    let api_routes = api::routes(client);
    let router = create_router::<openapi::ApiDoc>(api_routes, &config.environment);
    let app = router.merge(health_router(config.app));

    info!("Starting ShareIt gateway on port {}", config.server.port);

    let coordinator = ShutdownCoordinator::new();
    create_production_app(app, &config.server, coordinator)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("ShareIt gateway shutdown complete");
    Ok(())
}
