//! Configuration for the ShareIt gateway tier

use core_config::{AppInfo, app_info, env_or_default, server::ServerConfig};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub server_url: String,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env_with_default_port(8080)?;
        let server_url = env_or_default("SHAREIT_SERVER_URL", "http://localhost:9090");

        Ok(Self {
            app: app_info!(),
            server,
            server_url,
            environment,
        })
    }
}
