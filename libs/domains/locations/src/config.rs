use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use std::time::Duration;

pub const DEFAULT_IBGE_BASE_URL: &str = "https://servicodados.ibge.gov.br/api/v2";
pub const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br/ws";
pub const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Upstream endpoints for location lookups.
///
/// - `IBGE_BASE_URL`, `VIACEP_BASE_URL`, `NOMINATIM_BASE_URL`: service roots
/// - `LOCATION_TIMEOUT_SECS`: per-request deadline (default 10)
#[derive(Clone, Debug)]
pub struct LocationConfig {
    pub ibge_base_url: String,
    pub viacep_base_url: String,
    pub nominatim_base_url: String,
    pub timeout: Duration,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            ibge_base_url: DEFAULT_IBGE_BASE_URL.to_string(),
            viacep_base_url: DEFAULT_VIACEP_BASE_URL.to_string(),
            nominatim_base_url: DEFAULT_NOMINATIM_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl LocationConfig {
    /// Point every upstream at one base URL (used with a mock server).
    pub fn with_single_upstream(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            ibge_base_url: base.clone(),
            viacep_base_url: base.clone(),
            nominatim_base_url: base,
            ..Self::default()
        }
    }

    /// HTTP client shared by the directory and the geocoder.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
    }
}

impl FromEnv for LocationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = env_parse("LOCATION_TIMEOUT_SECS", "10")?;

        Ok(Self {
            ibge_base_url: trimmed(env_or_default("IBGE_BASE_URL", DEFAULT_IBGE_BASE_URL)),
            viacep_base_url: trimmed(env_or_default("VIACEP_BASE_URL", DEFAULT_VIACEP_BASE_URL)),
            nominatim_base_url: trimmed(env_or_default(
                "NOMINATIM_BASE_URL",
                DEFAULT_NOMINATIM_BASE_URL,
            )),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn trimmed(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
