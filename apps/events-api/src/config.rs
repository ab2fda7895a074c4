use axum_helpers::AuthConfig;
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_events::StoreConfig;
use domain_locations::LocationConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub auth: AuthConfig,
    pub store: StoreConfig,
    pub location: LocationConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let auth = AuthConfig::from_env()?;
        let store = StoreConfig::from_env()?;
        let location = LocationConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            auth,
            store,
            location,
        })
    }
}
