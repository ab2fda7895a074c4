//! IBGE localities directory

use crate::client::get_json;
use crate::config::LocationConfig;
use crate::error::LocationResult;
use crate::models::{City, State};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Source of the state and municipality listings
#[async_trait]
pub trait LocationDirectory: Send + Sync {
    /// Every state
    async fn states(&self) -> LocationResult<Vec<State>>;

    /// Municipalities of one state
    async fn cities_in_state(&self, state_id: i64) -> LocationResult<Vec<City>>;

    /// Every municipality in the country
    async fn all_cities(&self) -> LocationResult<Vec<City>>;
}

/// [`LocationDirectory`] backed by the IBGE localities HTTP API
#[derive(Clone)]
pub struct IbgeDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl IbgeDirectory {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &LocationConfig) -> LocationResult<Self> {
        Ok(Self::new(config.http_client()?, config.ibge_base_url.clone()))
    }
}

#[async_trait]
impl LocationDirectory for IbgeDirectory {
    #[instrument(skip(self))]
    async fn states(&self) -> LocationResult<Vec<State>> {
        let url = format!("{}/localidades/estados", self.base_url);
        let states: Vec<State> = get_json(&self.client, &url).await?;
        debug!(count = states.len(), "Fetched states");
        Ok(states)
    }

    #[instrument(skip(self))]
    async fn cities_in_state(&self, state_id: i64) -> LocationResult<Vec<City>> {
        let url = format!(
            "{}/localidades/estados/{}/municipios",
            self.base_url, state_id
        );
        get_json(&self.client, &url).await
    }

    #[instrument(skip(self))]
    async fn all_cities(&self) -> LocationResult<Vec<City>> {
        let url = format!("{}/localidades/municipios", self.base_url);
        get_json(&self.client, &url).await
    }
}
