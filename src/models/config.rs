use config::{Config, ConfigError, Environment, File};
use pushkind_common::models::config::CommonServerConfig;
use serde::Deserialize;

/// Configuration options of the time-tracking service.
///
/// Values come from `config/default.yaml`, then `config/{APP_ENV}.yaml` if it
/// exists, then `APP__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Key shared with the auth service. Signs the session cookie and the
    /// identity token. At least 64 bytes.
    pub secret: String,
    /// Cookie domain shared with the auth service.
    pub domain: String,
    pub templates_dir: String,
    /// Where users are sent to sign in and after signing out.
    pub auth_service_url: String,
}

impl ServerConfig {
    pub fn load(app_env: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Settings shared with the other services behind the same auth service.
    pub fn common(&self) -> CommonServerConfig {
        CommonServerConfig {
            auth_service_url: self.auth_service_url.clone(),
            secret: self.secret.clone(),
        }
    }
}
