use crate::directory::LocationDirectory;
use crate::error::{LocationError, LocationResult};
use crate::label::{contains_ignore_case, parse_label};
use crate::models::City;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Resolves free-text labels to IBGE municipalities
pub struct LocationService<D: LocationDirectory> {
    directory: Arc<D>,
}

impl<D: LocationDirectory> LocationService<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }

    /// Cities whose name contains the label's city fragment.
    ///
    /// With a state fragment the search is limited to the first state whose
    /// name contains it; no such state is an error. Without one every
    /// municipality in the country is searched.
    #[instrument(skip(self))]
    pub async fn search_location(&self, label: &str) -> LocationResult<Vec<City>> {
        let parts = parse_label(label);

        let cities = match parts.state.as_deref() {
            Some(state_name) => {
                let state = self
                    .directory
                    .states()
                    .await?
                    .into_iter()
                    .find(|s| contains_ignore_case(&s.nome, state_name))
                    .ok_or_else(|| LocationError::StateNotFound(state_name.to_string()))?;

                debug!(state_id = state.id, state = %state.nome, "State matched");
                self.directory.cities_in_state(state.id).await?
            }
            None => self.directory.all_cities().await?,
        };

        let matches: Vec<City> = cities
            .into_iter()
            .filter(|c| contains_ignore_case(&c.nome, &parts.city))
            .collect();

        debug!(count = matches.len(), city = %parts.city, "Cities matched");
        Ok(matches)
    }
}
